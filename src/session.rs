//! Wires parsed CLI commands to the client operations. This is the only
//! place that knows both what the user asked for and which component
//! serves it.

use std::io::BufRead;
use std::path::Path;

use crate::api::posts::PostDraft;
use crate::api::Gateway;
use crate::auth::{account, CredentialStore};
use crate::config::{Cli, Command, Config};
use crate::feed::FeedClient;
use crate::render::{Render, Terminal};

pub async fn run(cli: &Cli, config: &Config, data_dir: &Path) -> anyhow::Result<()> {
    let gateway = Gateway::new(&config.api.base_url)?;
    let mut store = CredentialStore::load_or_create(data_dir, &config.api.key)?;
    let mut render = Terminal::default();
    let mut failed = false;

    match &cli.command {
        Command::Login { email, password } => {
            match account::login(&gateway, &mut store, &config.api.key, email, password).await {
                Ok(()) => render.notice("Logged in. Your session is stored until you log out."),
                Err(e) => {
                    render.error(&format!("Login failed: {}", e));
                    failed = true;
                }
            }
        }

        Command::Register {
            name,
            email,
            password,
        } => match account::register(&gateway, name, email, password).await {
            Ok(()) => render.notice("Registration successful! You can now log in."),
            Err(e) => {
                render.error(&format!("Registration failed: {}", e));
                failed = true;
            }
        },

        Command::Logout => match account::logout(&mut store) {
            Ok(()) => render.notice("Logged out."),
            Err(e) => {
                render.error(&format!("Logout failed: {}", e));
                failed = true;
            }
        },

        Command::Feed { page, no_follow } => {
            let mut client = FeedClient::new(gateway, store, config.clone(), render);
            match client.list(*page).await {
                Ok(true) => {
                    if !*no_follow {
                        load_more(&mut client).await?;
                    }
                }
                Ok(false) => {
                    tracing::info!("No stored credentials; run `parlour login` first");
                }
                Err(e) => {
                    client
                        .render_mut()
                        .error(&format!("Error fetching posts: {}", e));
                    failed = true;
                }
            }
        }

        Command::Post { id } => {
            let mut client = FeedClient::new(gateway, store, config.clone(), render);
            match client.single(id).await {
                Ok(_) => {}
                Err(e) => {
                    client
                        .render_mut()
                        .error(&format!("Error fetching post details: {}", e));
                    failed = true;
                }
            }
        }

        Command::Create {
            title,
            image,
            location,
            text,
        } => {
            let draft = PostDraft {
                title: title.clone(),
                image: image.clone(),
                location: location.clone(),
                text: text.clone(),
            };
            let mut client = FeedClient::new(gateway, store, config.clone(), render);
            if let Err(e) = client.create(&draft).await {
                client
                    .render_mut()
                    .error(&format!("Post creation failed: {}", e));
                failed = true;
            }
        }

        Command::Update {
            id,
            title,
            image,
            location,
            text,
        } => {
            let draft = PostDraft {
                title: title.clone(),
                image: image.clone(),
                location: location.clone(),
                text: text.clone(),
            };
            let mut client = FeedClient::new(gateway, store, config.clone(), render);
            if let Err(e) = client.update(id, &draft).await {
                client
                    .render_mut()
                    .error(&format!("Post update failed: {}", e));
                failed = true;
            }
        }

        Command::Delete { id } => {
            let mut client = FeedClient::new(gateway, store, config.clone(), render);
            if let Err(e) = client.delete(id).await {
                client
                    .render_mut()
                    .error(&format!("Error deleting post: {}", e));
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// The load-more control: keep fetching the next page until the feed is
/// exhausted or the user quits.
async fn load_more<R: Render>(client: &mut FeedClient<R>) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    while !client.cursor().exhausted() {
        eprint!("[Enter] load more, [q] quit: ");
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }
        let next = client.cursor().next();
        if let Err(e) = client.list(next).await {
            client
                .render_mut()
                .error(&format!("Error fetching posts: {}", e));
            break;
        }
    }
    Ok(())
}
