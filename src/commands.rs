//! Handlers for the content management subcommands.
//!
//! Every handler works through a `Context`, exactly like a view consumer
//! would, so the CLI exercises the same surface as any other front end.

use crate::{
    cli::{BlogAction, Commands, DestinationAction, Slice},
    context::{Context, SiteHandle},
    log,
    router::Resolution,
    store::{BlogPost, Destination, SettingsPatch, Storage},
};
use anyhow::{Result, bail};
use chrono::{Local, Utc};
use serde::Serialize;

/// Run a non-serve subcommand against the site in `cx`.
pub fn run<S: Storage>(command: &Commands, cx: Context<'_, S>) -> Result<()> {
    let site = cx.use_site()?;

    match command {
        Commands::Show { slice } => show(&site, *slice),
        Commands::Settings(args) => {
            let patch = SettingsPatch::from(args.clone());
            if patch.is_empty() {
                bail!("nothing to update, pass at least one settings flag");
            }
            site.update_settings(patch)?;
            log!("store"; "settings updated");
            Ok(())
        }
        Commands::Destinations { action } => destinations(&site, action),
        Commands::Blog { action } => blog(&site, action),
        Commands::Login => {
            site.login()?;
            log!("store"; "admin session opened");
            Ok(())
        }
        Commands::Logout => {
            site.logout()?;
            log!("store"; "admin session closed");
            Ok(())
        }
        Commands::Reset => {
            site.reset()?;
            log!("store"; "restored built-in content");
            Ok(())
        }
        Commands::Route { path } => {
            match site.resolve(path) {
                Some(Resolution::Render(route)) => println!("render {} ({})", route, route.name()),
                Some(Resolution::Redirect(route)) => println!("redirect {route}"),
                None => bail!("no page at `{path}`"),
            }
            Ok(())
        }
        Commands::Serve { .. } => bail!("`serve` is not a content command"),
    }
}

fn show<S: Storage>(site: &SiteHandle<'_, S>, slice: Option<Slice>) -> Result<()> {
    let state = site.state();
    match slice {
        None => print_json(&state),
        Some(Slice::Settings) => print_json(&state.settings),
        Some(Slice::Destinations) => print_json(&state.destinations),
        Some(Slice::Blog) => print_json(&state.blog_posts),
        Some(Slice::Services) => print_json(&state.services),
        Some(Slice::Admin) => print_json(&state.is_admin),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Millisecond timestamp, unique enough for hand-entered content.
fn new_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

fn destinations<S: Storage>(site: &SiteHandle<'_, S>, action: &DestinationAction) -> Result<()> {
    match action {
        DestinationAction::List => {
            for d in site.state().destinations {
                let star = if d.featured { "*" } else { " " };
                println!("{star} {:>14}  {}  ({}, {})", d.id, d.name, d.region, d.price);
            }
        }
        DestinationAction::Add {
            name,
            region,
            price,
            description,
            image,
            featured,
            id,
        } => {
            let destination = Destination {
                id: id.clone().unwrap_or_else(new_id),
                name: name.clone(),
                region: region.clone(),
                description: description.clone(),
                price: *price,
                image: image.clone(),
                featured: *featured,
            };
            let id = destination.id.clone();
            site.add_destination(destination)?;
            log!("store"; "added destination `{}`", id);
        }
        DestinationAction::Remove { id } => {
            site.remove_destination(id)?;
            log!("store"; "removed destination `{}`", id);
        }
        DestinationAction::Feature { id, off } => {
            site.edit_destination(id, |d| d.featured = !off)?;
            log!("store"; "destination `{}` featured: {}", id, !off);
        }
    }
    Ok(())
}

fn blog<S: Storage>(site: &SiteHandle<'_, S>, action: &BlogAction) -> Result<()> {
    match action {
        BlogAction::List { published } => {
            let state = site.state();
            for p in state.blog_posts.iter().filter(|p| !published || p.published) {
                let mark = if p.published { "+" } else { "-" };
                println!("{mark} {:>14}  {}  {}  by {}", p.id, p.date, p.title, p.author);
            }
        }
        BlogAction::Add {
            title,
            author,
            excerpt,
            content,
            date,
            image,
            category,
            published,
            id,
        } => {
            let post = BlogPost {
                id: id.clone().unwrap_or_else(new_id),
                title: title.clone(),
                excerpt: excerpt.clone(),
                content: content.clone(),
                author: author.clone(),
                date: date
                    .clone()
                    .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string()),
                image: image.clone(),
                category: category.clone(),
                published: *published,
            };
            let id = post.id.clone();
            site.add_blog_post(post)?;
            log!("store"; "added blog post `{}`", id);
        }
        BlogAction::Remove { id } => {
            site.remove_blog_post(id)?;
            log!("store"; "removed blog post `{}`", id);
        }
        BlogAction::Publish { id, off } => {
            site.edit_blog_post(id, |p| p.published = !off)?;
            log!("store"; "blog post `{}` published: {}", id, !off);
        }
    }
    Ok(())
}
