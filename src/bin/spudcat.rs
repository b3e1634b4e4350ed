use std::{
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use spudcat::MemeGenerator as _;

#[derive(Parser, Debug)]
#[command(name = "spudcat", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service.
    Serve(ServeArgs),
    /// Render a full animation from local images to a GIF.
    Render(RenderArgs),
    /// Render a single composited frame as a PNG.
    Frame(FrameArgs),
    /// Print the animation parameters of one frame as JSON.
    Params(ParamsArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Listen port; overrides `PORT`.
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

#[derive(Parser, Debug)]
struct SubjectArgs {
    /// Foreground (potato) image.
    #[arg(long)]
    potato: PathBuf,

    /// Background (cat) image.
    #[arg(long)]
    cat: PathBuf,

    /// Top caption. A random caption pair is used unless both captions are given.
    #[arg(long)]
    top: Option<String>,

    /// Bottom caption.
    #[arg(long)]
    bottom: Option<String>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    subjects: SubjectArgs,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    subjects: SubjectArgs,

    /// Frame index (0-based).
    #[arg(long)]
    index: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ParamsArgs {
    /// Frame index (0-based).
    #[arg(long)]
    index: u32,

    /// Frames per loop.
    #[arg(long, default_value_t = spudcat::TOTAL_FRAMES)]
    total: u32,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve(args) => cmd_serve(args),
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Params(args) => cmd_params(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut cfg = spudcat::Config::load()?;
    if let Some(port) = args.port {
        cfg.port = port;
    }

    let generator = spudcat::MemeCompositor::new().context("create meme generator")?;
    let http = spudcat::sources::http_client(cfg.http_timeout)?;
    let state = spudcat::server::AppState::new(
        Arc::new(spudcat::RedditClient::new(http.clone())),
        Arc::new(spudcat::CataasClient::new(http.clone())),
        Arc::new(http),
        Arc::new(generator),
    )
    .with_request_timeout(cfg.request_timeout);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, cfg.port));
    let rt = tokio::runtime::Runtime::new().context("start tokio runtime")?;
    rt.block_on(spudcat::server::serve(state, addr))?;
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (potato, cat) = load_subjects(&args.subjects)?;
    let generator = spudcat::MemeCompositor::new()?;

    let anim = match (&args.subjects.top, &args.subjects.bottom) {
        (Some(top), Some(bottom)) if !top.is_empty() && !bottom.is_empty() => {
            generator.generate(Some(&potato), Some(&cat), top, bottom)?
        }
        _ => generator.generate_random(Some(&potato), Some(&cat))?,
    };

    create_parent_dir(&args.out)?;
    let f = std::fs::File::create(&args.out)
        .with_context(|| format!("create gif '{}'", args.out.display()))?;
    anim.encode_gif(std::io::BufWriter::new(f))?;

    eprintln!("wrote {} ({} frames)", args.out.display(), anim.frames.len());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (potato, cat) = load_subjects(&args.subjects)?;
    let generator = spudcat::MemeCompositor::new()?;
    let caption = spudcat::random_caption();
    let top = args.subjects.top.as_deref().unwrap_or(caption.top);
    let bottom = args.subjects.bottom.as_deref().unwrap_or(caption.bottom);

    let frame = generator.render_frame(Some(&potato), Some(&cat), top, bottom, args.index)?;

    create_parent_dir(&args.out)?;
    frame
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_params(args: ParamsArgs) -> anyhow::Result<()> {
    let canvas = spudcat::Canvas::new(spudcat::CANVAS_WIDTH, spudcat::CANVAS_HEIGHT);
    let params = spudcat::compute_frame_params(args.index, args.total, canvas);
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

fn load_subjects(args: &SubjectArgs) -> anyhow::Result<(image::DynamicImage, image::DynamicImage)> {
    Ok((load_image(&args.potato)?, load_image(&args.cat)?))
}

fn load_image(path: &Path) -> anyhow::Result<image::DynamicImage> {
    image::open(path).with_context(|| format!("decode image '{}'", path.display()))
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
