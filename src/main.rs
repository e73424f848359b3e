use clap::{Parser, Subcommand};
use school_gallery::{FileStore, Gallery, GalleryError, YearFilter, config, output};
use std::path::{Path, PathBuf};

/// Password flag shared by the moderation commands.
#[derive(clap::Args, Clone)]
struct AdminArgs {
    /// Admin password
    #[arg(long)]
    password: String,
}

#[derive(Parser)]
#[command(name = "school-gallery")]
#[command(about = "Moderated photo gallery for school memories")]
#[command(long_about = "\
Moderated photo gallery for school memories

Uploaded photos wait in a moderation queue until an administrator approves
or rejects them. Approved photos form the public gallery, which can be
filtered by year and liked.

Storage layout:

  .school-gallery/
  ├── config.toml                  # Optional, see 'gen-config'
  ├── school_gallery_photos.json   # Approved photos
  ├── school_gallery_pending.json  # Moderation queue
  └── liked_photos.json            # Ids this viewer has liked

Set RUST_LOG=info to log state transitions.")]
#[command(version)]
struct Cli {
    /// Directory holding the gallery records and config.toml
    #[arg(long, default_value = ".school-gallery", global = true)]
    store_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show approved photos, newest first
    Gallery {
        /// "all" or a year such as 2022
        #[arg(long, default_value = "all")]
        year: YearFilter,
    },
    /// Upload a photo for moderation
    Upload {
        /// Image file to upload
        file: PathBuf,
    },
    /// Like or unlike an approved photo
    Like { id: String },
    /// Show approved and pending counts
    Stats,
    /// List photos awaiting moderation
    Pending(AdminArgs),
    /// List approved photos (admin view)
    Approved(AdminArgs),
    /// Publish a pending photo
    Approve {
        id: String,
        #[command(flatten)]
        admin: AdminArgs,
    },
    /// Discard a pending photo
    Reject {
        id: String,
        #[command(flatten)]
        admin: AdminArgs,
    },
    /// Permanently remove an approved photo
    Delete {
        id: String,
        #[command(flatten)]
        admin: AdminArgs,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let store_dir = cli.store_dir;

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Gallery { year } => {
            let gallery = open_gallery(&store_dir)?;
            let photos = gallery.project(year);
            output::print_gallery(&photos, year, &gallery.available_years(), |id| {
                gallery.is_liked(id)
            });
        }
        Command::Upload { file } => {
            let mut gallery = open_gallery(&store_dir)?;
            let photo = gallery.submit_file(&file)?;
            println!("{}", output::format_action("Queued", &photo));
            println!("Waiting for an administrator to approve it");
        }
        Command::Like { id } => {
            let mut gallery = open_gallery(&store_dir)?;
            match gallery.toggle_like(&id) {
                Ok(likes) => {
                    let liked = gallery.is_liked(&id);
                    println!("{}", output::format_like(&id, likes, liked));
                }
                Err(e) => report_no_op(e)?,
            }
        }
        Command::Stats => {
            let gallery = open_gallery(&store_dir)?;
            println!("{}", output::format_stats(&gallery.stats()));
        }
        Command::Pending(admin) => {
            let gallery = open_admin(&store_dir, &admin)?;
            output::print_admin_list("Pending", gallery.pending());
        }
        Command::Approved(admin) => {
            let gallery = open_admin(&store_dir, &admin)?;
            output::print_admin_list("Approved", gallery.project(YearFilter::All));
        }
        Command::Approve { id, admin } => {
            let mut gallery = open_admin(&store_dir, &admin)?;
            match gallery.approve(&id) {
                Ok(photo) => println!("{}", output::format_action("Approved", &photo)),
                Err(e) => report_no_op(e)?,
            }
        }
        Command::Reject { id, admin } => {
            let mut gallery = open_admin(&store_dir, &admin)?;
            match gallery.reject(&id) {
                Ok(photo) => println!("{}", output::format_action("Rejected", &photo)),
                Err(e) => report_no_op(e)?,
            }
        }
        Command::Delete { id, admin } => {
            let mut gallery = open_admin(&store_dir, &admin)?;
            match gallery.delete(&id) {
                Ok(photo) => println!("{}", output::format_action("Deleted", &photo)),
                Err(e) => report_no_op(e)?,
            }
        }
    }

    Ok(())
}

/// Load config and state from `store_dir`, reporting any storage repairs.
fn open_gallery(store_dir: &Path) -> Result<Gallery<FileStore>, Box<dyn std::error::Error>> {
    let config = config::load_config(store_dir)?;
    let store = FileStore::open(store_dir)?;
    let (gallery, report) = Gallery::load(store, config)?;
    output::print_load_report(&report);
    Ok(gallery)
}

/// [`open_gallery`] followed by an admin session, or fail the command.
fn open_admin(
    store_dir: &Path,
    admin: &AdminArgs,
) -> Result<Gallery<FileStore>, Box<dyn std::error::Error>> {
    let mut gallery = open_gallery(store_dir)?;
    if gallery.admin_authenticate(&admin.password) {
        Ok(gallery)
    } else {
        Err(GalleryError::WrongPassword.into())
    }
}

/// Unknown ids are reported but don't fail the command; anything else does.
fn report_no_op(err: GalleryError) -> Result<(), GalleryError> {
    if err.is_not_found() {
        println!("{err}; nothing changed");
        Ok(())
    } else {
        Err(err)
    }
}
