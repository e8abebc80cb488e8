//! Chronomap CLI — annotated text interaction engine.
//!
//! Usage:
//!   chronomap annotate [FILE]
//!   chronomap demo [--hover-delay-ms ms] [--no-markers]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use chronomap::{
    annotate, ArticleDocument, ArticleLoader, Block, ContentNode, Inline, InteractionController,
    LinkAction, LoadOutcome, MapSurface, MemoryContent, MemoryGeocoder, RenderedNode,
    SessionContext, Settings, Timeline,
};

#[derive(Parser)]
#[command(
    name = "chronomap",
    version,
    about = "Annotated text interaction engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect place and year annotations in text
    Annotate {
        /// File to read; stdin when omitted
        file: Option<PathBuf>,
        /// Emit the content nodes as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load a built-in article and walk its annotations
    Demo {
        /// Hover dwell time in milliseconds
        #[arg(long, default_value_t = 1000)]
        hover_delay_ms: u64,
        /// Skip dropping map markers on successful lookups
        #[arg(long)]
        no_markers: bool,
    },
}

/// Map sink that prints instead of rendering.
struct PrintingMap;

impl MapSurface for PrintingMap {
    fn recenter(&self, lat: f64, lon: f64, zoom: f64) {
        println!("  [map] recenter to ({lat:.4}, {lon:.4}) zoom {zoom}");
    }

    fn place_marker(&self, lat: f64, lon: f64, label: &str) {
        println!("  [map] marker '{label}' at ({lat:.4}, {lon:.4})");
    }
}

struct PrintingTimeline;

impl Timeline for PrintingTimeline {
    fn set_date(&self, iso_date: &str) {
        println!("  [timeline] date {iso_date}");
    }

    fn set_indicator(&self, text: &str) {
        println!("  [timeline] showing '{text}'");
    }
}

fn read_input(file: Option<PathBuf>) -> Result<String, String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e)),
        None => {
            let mut text = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut text)
                .map_err(|e| format!("cannot read stdin: {}", e))?;
            Ok(text)
        }
    }
}

fn cmd_annotate(file: Option<PathBuf>, json: bool) -> i32 {
    let text = match read_input(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let nodes = annotate(&text);
    if json {
        match serde_json::to_string_pretty(&nodes) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
        return 0;
    }
    for node in nodes {
        match node {
            ContentNode::Text(plain) => println!("text  {:?}", plain),
            ContentNode::Place(span) => {
                println!("place {:?} [{}..{}]", span.text, span.start, span.end)
            }
            ContentNode::Year(span) => {
                let year = span.year_info().map(|info| info.year).unwrap_or_default();
                println!("year  {:?} ({}) [{}..{}]", span.text, year, span.start, span.end)
            }
        }
    }
    0
}

fn demo_content() -> MemoryContent {
    let article = ArticleDocument::new("Rome")
        .with_paragraph("Rome was founded in 753 BC and rebuilt many times since.")
        .with_paragraph(
            "By the 1950s, visitors from Paris and New York City arrived daily.",
        )
        .with_block(
            Block::paragraph("See also: ")
                .with_inline(Inline::Link {
                    href: "/wiki/Roman_Empire".to_string(),
                    text: "Roman Empire".to_string(),
                })
                .with_inline(Inline::Image {
                    src: "//upload.wikimedia.org/forum.jpg".to_string(),
                }),
        );
    MemoryContent::new().with_article("en", article)
}

async fn cmd_demo(hover_delay_ms: u64, no_markers: bool) -> i32 {
    let settings = Settings {
        hover_delay_ms,
        markers_enabled: !no_markers,
    };
    let session = SessionContext::new("en").with_settings(settings.clone());
    let geocoder = MemoryGeocoder::new()
        .with_place("Rome", 41.9028, 12.4964)
        .with_place("Paris", 48.8566, 2.3522)
        .with_place("New York City", 40.7128, -74.0060);
    let controller = InteractionController::new(
        &settings,
        Arc::new(geocoder),
        Arc::new(PrintingMap),
        Arc::new(PrintingTimeline),
    );
    let loader = ArticleLoader::new(session, Arc::new(demo_content()), controller);

    let article = match loader.load("Rome", true).await {
        Ok(LoadOutcome::Rendered(article)) => article,
        Ok(LoadOutcome::Superseded) => {
            eprintln!("Error: load superseded");
            return 1;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    println!("Loaded '{}'", article.title);
    for (index, block) in article.blocks.iter().enumerate() {
        print!("  block {}: ", index);
        for node in &block.nodes {
            match node {
                RenderedNode::Text(text) => print!("{}", text),
                RenderedNode::Annotation(element) => match &element.node {
                    ContentNode::Place(span) => print!("[place:{}]", span.text),
                    ContentNode::Year(span) => print!("[year:{}]", span.text),
                    ContentNode::Text(text) => print!("{}", text),
                },
                RenderedNode::Link { action, text } => match action {
                    LinkAction::LoadArticle(title) => print!("[load:{} \"{}\"]", title, text),
                    LinkAction::External(href) => print!("[ext:{}]", href),
                },
                RenderedNode::Image { src } => print!("[img:{}]", src),
            }
        }
        println!();
    }

    println!("Activating each annotation:");
    for element in article.annotation_elements() {
        println!("  activate '{}'", element.node.text());
        loader.controller().activate(element.id).await;
    }

    let nav = loader.nav_state();
    println!(
        "History: {} entries (back: {}, next: {})",
        loader.history_len(),
        nav.can_back,
        nav.can_next
    );
    0
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Annotate { file, json } => cmd_annotate(file, json),
        Commands::Demo {
            hover_delay_ms,
            no_markers,
        } => cmd_demo(hover_delay_ms, no_markers).await,
    };
    std::process::exit(code);
}
