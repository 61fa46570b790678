//! Where fetched data lands and user-facing messages go. The feed client
//! never touches the terminal directly; it talks to this trait.

use crate::api::posts::Post;

pub trait Render {
    fn render_list(&mut self, posts: &[Post], page: u32);

    fn render_single(&mut self, post: &Post);

    /// The feed has no more pages; hide or disable any load-more control.
    fn pagination_exhausted(&mut self);

    /// Put the post editor back into its blank create state. Surfaces
    /// without a persistent editor can ignore this.
    fn reset_editor(&mut self) {}

    fn notice(&mut self, message: &str);

    fn error(&mut self, message: &str);
}

/// Plain-text rendering on stdout/stderr.
#[derive(Debug, Default)]
pub struct Terminal;

impl Render for Terminal {
    fn render_list(&mut self, posts: &[Post], page: u32) {
        println!("Page {}", page);
        if posts.is_empty() {
            println!("  (no posts)");
            return;
        }
        for post in posts {
            println!(
                "  #{:<6} {}  [{}]  by {}  ({} reactions)",
                post.id,
                post.title,
                post.location(),
                post.author_name(),
                post.count.reactions,
            );
        }
    }

    fn render_single(&mut self, post: &Post) {
        println!("#{} {}", post.id, post.title);
        println!("by {} in {}", post.author_name(), post.location());
        if let Some(created) = &post.created {
            println!("posted {}", created.to_rfc3339());
        }
        if let Some(media) = &post.media {
            println!("image: {}", media.url);
        }
        println!();
        match &post.body {
            Some(body) if !body.is_empty() => println!("{}", body),
            _ => println!("No content"),
        }
        println!();
        println!(
            "{} reactions, {} comments",
            post.count.reactions, post.count.comments
        );
    }

    fn pagination_exhausted(&mut self) {
        println!("End of the feed.");
    }

    fn notice(&mut self, message: &str) {
        println!("{}", message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}
