use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use hero_reveal::{
    HeroReveal, Rect, RevealConfig, RevealState, Role, StaticElement, StaticPage, logo_size,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hero-reveal", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render mask frames at evenly spaced scroll progress values as PNGs.
    Frames(FramesArgs),
    /// Print the initial placement and frozen anchor as JSON.
    Anchor(PageArgs),
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Logo SVG file.
    #[arg(long)]
    logo: PathBuf,

    /// Optional effect config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hero container width in CSS pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Hero container height in CSS pixels (also the viewport height).
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// On-screen width of the logo placeholder mark. Falls back to the config value.
    #[arg(long)]
    logo_width: Option<f64>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Number of progress steps; `steps + 1` frames are written.
    #[arg(long, default_value_t = 4)]
    steps: u32,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Anchor(args) => cmd_anchor(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<RevealConfig> {
    match path {
        Some(p) => RevealConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(RevealConfig::default()),
    }
}

fn build_page(args: &PageArgs) -> anyhow::Result<StaticPage> {
    if !(args.width > 0.0 && args.height > 0.0) {
        anyhow::bail!("width and height must be > 0");
    }
    let svg = std::fs::read_to_string(&args.logo)
        .with_context(|| format!("read logo '{}'", args.logo.display()))?;

    let hero = Rect::new(0.0, 0.0, args.width, args.height);
    let mut page = StaticPage::new(args.height);
    page.insert(
        Role::Canvas,
        StaticElement {
            layout: hero,
            parent: Some(hero),
            svg: None,
        },
    );
    page.insert(
        Role::ScrollTarget,
        StaticElement {
            layout: Rect::new(0.0, 0.0, args.width, args.height * 3.0),
            ..StaticElement::default()
        },
    );
    page.insert(
        Role::Logo,
        StaticElement {
            layout: Rect::ZERO,
            parent: None,
            svg: Some(svg),
        },
    );
    if let Some(w) = args.logo_width {
        page.insert(
            Role::LogoPlaceholder,
            StaticElement {
                layout: Rect::new(0.0, 0.0, w, w),
                ..StaticElement::default()
            },
        );
    }
    Ok(page)
}

fn mount_ready(args: &PageArgs) -> anyhow::Result<HeroReveal<StaticPage>> {
    let config = load_config(args.config.as_deref())?;
    let page = build_page(args)?;
    let mut fx = HeroReveal::mount(page, config)?
        .context("effect did not mount: required element missing")?;
    fx.on_load();
    fx.run_pending();
    if fx.state() != RevealState::Ready {
        anyhow::bail!("logo '{}' could not be decoded", args.logo.display());
    }
    Ok(fx)
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut fx = mount_ready(&args.page)?;
    let (start, end) = fx
        .trigger()
        .map(|t| t.bounds())
        .context("scroll driver was not created")?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let steps = args.steps.max(1);
    for i in 0..=steps {
        let progress = f64::from(i) / f64::from(steps);
        fx.on_scroll(start + (end - start) * progress);

        let path = args.out.join(format!("mask_{i:03}.png"));
        let png = fx.surface().encode_png()?;
        std::fs::write(&path, png).with_context(|| format!("write png '{}'", path.display()))?;
        eprintln!(
            "wrote {} (progress {progress:.3}, width {:.1})",
            path.display(),
            fx.current_width().unwrap_or_default()
        );
    }
    Ok(())
}

fn cmd_anchor(args: PageArgs) -> anyhow::Result<()> {
    let fx = mount_ready(&args)?;
    let scaler = fx.scaler().context("logo not loaded")?;
    let width = fx.current_width().context("no initial paint")?;
    let initial = scaler.placement(width);
    let size = logo_size(width, scaler.aspect_ratio());
    let anchor = scaler.anchor_position();
    let trigger = fx.trigger().context("scroll driver was not created")?;
    let (start, end) = trigger.bounds();

    let report = serde_json::json!({
        "surface": { "width": fx.surface().width(), "height": fx.surface().height() },
        "aspect_ratio": scaler.aspect_ratio(),
        "initial": { "x": initial.x0, "y": initial.y0, "width": size.width, "height": size.height },
        "anchor": { "x": anchor.x, "y": anchor.y },
        "terminal_width": trigger.tween().to,
        "scroll": { "start": start, "end": end },
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
