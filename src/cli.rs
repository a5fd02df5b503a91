//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::store::SettingsPatch;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// TourWithMe site content manager
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Config file path
    #[arg(short = 'C', long, default_value = crate::config::defaults::CONFIG_FILE)]
    pub config: PathBuf,

    /// Storage directory (overrides `[storage].dir`)
    #[arg(short, long)]
    pub storage: Option<PathBuf>,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the site state (or one slice of it) as JSON
    Show {
        #[arg(value_enum)]
        slice: Option<Slice>,
    },

    /// Update site settings; only the given fields change
    Settings(SettingsArgs),

    /// Manage destinations
    Destinations {
        #[command(subcommand)]
        action: DestinationAction,
    },

    /// Manage blog posts
    Blog {
        #[command(subcommand)]
        action: BlogAction,
    },

    /// Open the admin session
    Login,

    /// Close the admin session
    Logout,

    /// Drop all stored content and return to the built-in defaults
    Reset,

    /// Show how a path resolves for the current session
    Route {
        /// e.g. `/about` or `/admin/dashboard`
        path: String,
    },

    /// Serve the site state and admin API over HTTP
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Part of the state printed by `show`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Settings,
    Destinations,
    Blog,
    Services,
    Admin,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    #[arg(long)]
    pub site_name: Option<String>,

    /// Theme color token, e.g. `indigo-600`
    #[arg(long)]
    pub primary_color: Option<String>,

    #[arg(long)]
    pub hero_title: Option<String>,

    #[arg(long)]
    pub hero_subtitle: Option<String>,

    #[arg(long)]
    pub hero_image: Option<String>,

    #[arg(long = "about")]
    pub about_content: Option<String>,

    #[arg(long = "email")]
    pub contact_email: Option<String>,

    #[arg(long = "phone")]
    pub contact_phone: Option<String>,

    #[arg(long = "address")]
    pub contact_address: Option<String>,
}

impl From<SettingsArgs> for SettingsPatch {
    fn from(args: SettingsArgs) -> Self {
        Self {
            site_name: args.site_name,
            primary_color: args.primary_color,
            hero_title: args.hero_title,
            hero_subtitle: args.hero_subtitle,
            hero_image: args.hero_image,
            about_content: args.about_content,
            contact_email: args.contact_email,
            contact_phone: args.contact_phone,
            contact_address: args.contact_address,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum DestinationAction {
    /// List destinations in display order
    List,

    /// Append a destination
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        region: String,

        #[arg(long)]
        price: f64,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        image: String,

        /// Show on the home page
        #[arg(long)]
        featured: bool,

        /// Explicit id (default: current timestamp in milliseconds)
        #[arg(long)]
        id: Option<String>,
    },

    /// Remove a destination by id
    Remove { id: String },

    /// Mark a destination as featured
    Feature {
        id: String,

        /// Remove the featured mark instead
        #[arg(long)]
        off: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum BlogAction {
    /// List blog posts
    List {
        /// Only posts visible to the public
        #[arg(long)]
        published: bool,
    },

    /// Append a blog post
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        author: String,

        #[arg(long, default_value = "")]
        excerpt: String,

        #[arg(long, default_value = "")]
        content: String,

        /// ISO date (default: today)
        #[arg(long)]
        date: Option<String>,

        #[arg(long, default_value = "")]
        image: String,

        #[arg(long, default_value = "General")]
        category: String,

        #[arg(long)]
        published: bool,

        /// Explicit id (default: current timestamp in milliseconds)
        #[arg(long)]
        id: Option<String>,
    },

    /// Remove a blog post by id
    Remove { id: String },

    /// Make a blog post public
    Publish {
        id: String,

        /// Hide the post instead
        #[arg(long)]
        off: bool,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_settings_into_patch() {
        let cli = Cli::parse_from([
            "tourwithme",
            "settings",
            "--site-name",
            "Wander",
            "--email",
            "hi@wander.travel",
        ]);
        let Commands::Settings(args) = cli.command else {
            panic!("expected settings command");
        };
        let patch = SettingsPatch::from(args);

        assert_eq!(patch.site_name.as_deref(), Some("Wander"));
        assert_eq!(patch.contact_email.as_deref(), Some("hi@wander.travel"));
        assert!(patch.hero_title.is_none());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from([
            "tourwithme",
            "--storage",
            "/tmp/site",
            "serve",
            "--port",
            "8080",
            "-v",
        ]);
        assert!(cli.verbose);
        assert!(cli.is_serve());
        assert_eq!(cli.storage, Some(PathBuf::from("/tmp/site")));
        assert_eq!(cli.config, PathBuf::from("tourwithme.toml"));
    }

    #[test]
    fn test_parse_destination_add() {
        let cli = Cli::parse_from([
            "tourwithme",
            "destinations",
            "add",
            "--name",
            "Lisbon, Portugal",
            "--region",
            "Europe",
            "--price",
            "850",
            "--featured",
        ]);
        let Commands::Destinations {
            action: DestinationAction::Add { name, price, featured, id, .. },
        } = cli.command
        else {
            panic!("expected destinations add");
        };
        assert_eq!(name, "Lisbon, Portugal");
        assert_eq!(price, 850.0);
        assert!(featured);
        assert!(id.is_none());
    }
}
