use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ghost_admin::config::{GHOST_ADMIN_API_KEY_ENV, GHOST_URL_ENV};
use ghost_admin::{
    AdminApiKey, AdminClient, GhostConfig, NewPost, Post, PostListParams, PostStatus, SiteUrl,
};
use serde_json::json;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Publish to a Ghost site through the Admin API", long_about = None)]
struct Args {
    /// Site URL, e.g. https://blog.example.com
    #[arg(long, env = GHOST_URL_ENV)]
    url: String,
    /// Admin API key in id:secret format
    #[arg(long, env = GHOST_ADMIN_API_KEY_ENV, hide_env_values = true)]
    admin_key: String,
    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a draft post
    CreateDraft(NewPostArgs),
    /// Create a published post
    CreatePost(NewPostArgs),
    /// Publish an existing post
    Publish { post_id: String },
    /// List posts, most recently updated first
    List {
        /// draft, published, scheduled, sent or all
        #[arg(default_value = "all")]
        status: String,
        #[arg(default_value_t = ghost_admin::admin::DEFAULT_LIST_LIMIT)]
        limit: u32,
    },
    /// Print a post as JSON
    Get { post_id: String },
    /// Upload an image and print its URL
    UploadImage {
        file_path: PathBuf,
        #[arg(value_name = "REF")]
        reference: Option<String>,
    },
}

#[derive(clap::Args)]
struct NewPostArgs {
    title: String,
    html: String,
    author_email: Option<String>,
    /// Comma-separated tag names
    tags: Option<String>,
}

impl NewPostArgs {
    fn into_post(self, status: PostStatus) -> NewPost {
        let mut post = NewPost::new(self.title, self.html).status(status);
        if let Some(email) = self.author_email {
            post = post.author_email(email);
        }
        if let Some(tags) = self.tags {
            post = post.tags(tags.split(',').map(str::trim).filter(|t| !t.is_empty()));
        }
        post
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Logs go to stderr so stdout only carries command output.
fn init_logging(level: Option<LogLevel>) {
    let env_filter = match level {
        Some(level) => EnvFilter::new(level.as_str()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("FATAL: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let mut builder = GhostConfig::builder()
        .site_url(SiteUrl::new(args.url).context("invalid site URL")?)
        .admin_api_key(AdminApiKey::new(&args.admin_key).context("invalid admin key")?);
    if let Some(secs) = args.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = AdminClient::new(&builder.build()?)?;

    match args.command {
        Command::CreateDraft(post) => {
            let post = client
                .create_post(&post.into_post(PostStatus::Draft))
                .await
                .context("create draft")?;
            print_json(&summary(&post, true))?;
        }
        Command::CreatePost(post) => {
            let post = client
                .create_post(&post.into_post(PostStatus::Published))
                .await
                .context("create post")?;
            print_json(&summary(&post, true))?;
        }
        Command::Publish { post_id } => {
            let post = client
                .publish_post(&post_id)
                .await
                .with_context(|| format!("publish {post_id}"))?;
            print_json(&summary(&post, false))?;
        }
        Command::List { status, limit } => {
            let params = PostListParams {
                status: (status != "all").then(|| PostStatus::from(status)),
                limit,
            };
            let posts = client.list_posts(&params).await.context("list posts")?;
            for post in posts {
                println!("{}  {:10}  {}", post.id, post.status.as_str(), post.title);
            }
        }
        Command::Get { post_id } => {
            let post = client
                .get_post(&post_id)
                .await
                .with_context(|| format!("get {post_id}"))?;
            print_json(&serde_json::to_value(&post)?)?;
        }
        Command::UploadImage {
            file_path,
            reference,
        } => {
            let url = client
                .upload_image_file(&file_path, reference.as_deref())
                .await
                .with_context(|| format!("upload {}", file_path.display()))?;
            println!("{url}");
        }
    }

    Ok(())
}

fn summary(post: &Post, with_title: bool) -> serde_json::Value {
    if with_title {
        json!({"id": post.id, "title": post.title, "status": post.status, "url": post.url})
    } else {
        json!({"id": post.id, "status": post.status, "url": post.url})
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
