mod document;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Map, Value};

use scenery_core::{Diagnostics, EngineConfig, FontType, SceneError, SceneResult};
use scenery_ir::{MediaKind, Normalizer, Scene, Style, Timeline};
use scenery_text::{ApproxMeasurer, FitOptions, FlowOptions, Overflow, TemplateSpec, TextEngine};

use crate::document::{load_config, Document};

#[derive(Parser)]
#[command(
    name = "scenery",
    version,
    about = "Scenery: resolve lesson scene documents into placed, ordered drawables"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a scene or timeline document and print it as JSON
    Resolve {
        /// Path to the scene (or timeline) JSON document
        #[arg()]
        file: PathBuf,

        /// Engine settings (scenery.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a scene or timeline document without printing it
    Check {
        #[arg()]
        file: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Lay out text for one template element
    Text {
        /// Path to the element template JSON
        #[arg()]
        template: PathBuf,

        /// Element type id, e.g. `captions` or `heading_h1`
        #[arg()]
        element: String,

        /// Layout variant: `primary` or `alternate`
        #[arg(long, default_value = "primary")]
        variant: String,

        /// Text to fit into the element
        #[arg(long, conflicts_with = "line", required_unless_present = "line")]
        text: Option<String>,

        /// Structured line; repeat for each line of a staggered flow
        #[arg(long)]
        line: Vec<String>,

        /// Cap the block at this many lines
        #[arg(long)]
        max_lines: Option<u32>,

        /// Keep overflowing text at its template size
        #[arg(long)]
        no_shrink: bool,

        /// Duration in seconds
        #[arg(long)]
        duration: Option<f64>,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write a default scenery.toml
    InitConfig {
        #[arg(default_value = "scenery.toml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // JSON goes to stdout, so logs must stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resolve { file, config } => cmd_resolve(&file, config.as_deref()),
        Commands::Check { file, config } => cmd_check(&file, config.as_deref()),
        Commands::Text {
            template,
            element,
            variant,
            text,
            line,
            max_lines,
            no_shrink,
            duration,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let request = TextRequest {
                element,
                variant,
                text,
                lines: line,
                max_lines,
                no_shrink,
                duration,
            };
            cmd_text(&template, &request, &config)
        }
        Commands::InitConfig { path } => cmd_init_config(&path),
    }
}

/// A resolved document: one scene or a timeline.
enum Output {
    Scene(Scene),
    Timeline(Timeline),
}

impl Output {
    fn scenes(&self) -> &[Scene] {
        match self {
            Output::Scene(scene) => std::slice::from_ref(scene),
            Output::Timeline(timeline) => timeline.scenes(),
        }
    }
}

#[derive(Serialize)]
struct ResolveReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    scene: Option<&'a Scene>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeline: Option<&'a Timeline>,
    /// Drawable labels per scene id, bottom to top.
    draw_order: Map<String, Value>,
    diagnostics: &'a Diagnostics,
}

fn resolve_document(document: &Document, config: &EngineConfig) -> SceneResult<(Output, Diagnostics)> {
    match document {
        Document::Scene(raw) => {
            let normalizer = Normalizer::from_config(config)?;
            let resolved = normalizer.normalize_scene(raw)?;
            Ok((Output::Scene(resolved.value), resolved.diagnostics))
        }
        Document::Timeline(raw) => {
            let normalizer =
                Normalizer::new(&raw.meta)?.with_upscale_limit(config.layout.upscale_limit);
            let resolved = Timeline::build_with(&normalizer, &raw.scenes)?;
            Ok((Output::Timeline(resolved.value), resolved.diagnostics))
        }
    }
}

fn cmd_resolve(file: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let document = Document::load(file)?;
    let (output, diagnostics) = resolve_document(&document, &config)
        .with_context(|| format!("failed to resolve {}", file.display()))?;

    for d in diagnostics.iter() {
        tracing::warn!("{}", d);
    }

    let draw_order = output
        .scenes()
        .iter()
        .map(|scene| {
            let labels = scene.draw_order().iter().map(|item| Value::from(item.label())).collect();
            (scene.id().to_string(), Value::Array(labels))
        })
        .collect();

    let report = ResolveReport {
        scene: match &output {
            Output::Scene(scene) => Some(scene),
            Output::Timeline(_) => None,
        },
        timeline: match &output {
            Output::Timeline(timeline) => Some(timeline),
            Output::Scene(_) => None,
        },
        draw_order,
        diagnostics: &diagnostics,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_check(file: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    println!("Checking {}", file.display());

    let document = Document::load(file)?;
    println!("   ✓ Parse OK");
    let (output, diagnostics) = match resolve_document(&document, &config) {
        Ok(resolved) => resolved,
        Err(err) => {
            let messages = flatten_violations(&err);
            anyhow::bail!("{} rejected:\n  {}", file.display(), messages.join("\n  "));
        }
    };

    for scene in output.scenes() {
        println!(
            "   ✓ {} ({}, {:.2}s..{:.2}s, {} slots, {})",
            scene.id(),
            scene.scene_type(),
            scene.start(),
            scene.end(),
            scene.slots().len(),
            graphic_summary(scene)
        );
    }
    for d in diagnostics.iter() {
        println!("   ⚠ {}", d);
    }
    println!("   No errors found.");
    Ok(())
}

/// Graphics of `scene` counted by media kind, e.g. `1 image, 2 shape`.
fn graphic_summary(scene: &Scene) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for graphic in scene.graphics() {
        let kind = match graphic.media_kind() {
            Some(MediaKind::Image) => "image",
            Some(MediaKind::Video) => "video",
            Some(MediaKind::Svg) => "svg",
            None if graphic.is_shape() => "shape",
            None => "other",
        };
        *counts.entry(kind).or_default() += 1;
    }
    if counts.is_empty() {
        return "no graphics".to_string();
    }
    counts
        .iter()
        .map(|(kind, n)| format!("{n} {kind}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every leaf violation of `err`, one message each.
fn flatten_violations(err: &SceneError) -> Vec<String> {
    match err {
        SceneError::Rejected { .. } => err
            .violations()
            .into_iter()
            .flat_map(|v| match v {
                SceneError::Rejected { element, .. } => flatten_violations(v)
                    .into_iter()
                    .map(|m| format!("{element}: {m}"))
                    .collect(),
                other => vec![other.to_string()],
            })
            .collect(),
        other => vec![other.to_string()],
    }
}

struct TextRequest {
    element: String,
    variant: String,
    text: Option<String>,
    lines: Vec<String>,
    max_lines: Option<u32>,
    no_shrink: bool,
    duration: Option<f64>,
}

fn cmd_text(template: &Path, request: &TextRequest, config: &EngineConfig) -> Result<()> {
    let spec = TemplateSpec::load_from_file(template)
        .with_context(|| format!("failed to load template: {}", template.display()))?;
    let layout = spec
        .resolve(&request.element, &request.variant)
        .with_context(|| format!("cannot resolve element '{}'", request.element))?;

    let font_type = if layout.mono { FontType::Mono } else { FontType::Sans };
    let measurer = ApproxMeasurer::for_font_type(font_type);
    let engine = TextEngine::new(&measurer).with_config(config.text.clone());
    let style = Style::default();

    let json = match &request.text {
        Some(text) => {
            let options = FitOptions {
                max_lines: request.max_lines,
                overflow: if request.no_shrink {
                    Overflow::None
                } else {
                    Overflow::Shrink
                },
                min_font_size: None,
                duration: request.duration,
            };
            let resolved = engine.fit_wrapped(&layout, text, &style, &options);
            serde_json::to_string_pretty(&resolved)?
        }
        None => {
            let mut options = FlowOptions::default();
            if let Some(duration) = request.duration {
                options.duration = duration;
            }
            let flow = engine.flow_structured(&layout, &request.lines, &style, &options);
            serde_json::to_string_pretty(&flow)?
        }
    };
    println!("{json}");
    Ok(())
}

fn cmd_init_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    EngineConfig::default()
        .save_to_file(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("Wrote default config to {}", path.display());
    Ok(())
}
