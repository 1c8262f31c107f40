//! Terminal front end for Pixaview.
//!
//! Reads search input line by line from stdin and prints results, status
//! messages and previews to stdout. Logs go to stderr; set `RUST_LOG` to
//! change verbosity.

mod command;
mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use pixaview_core::model::{ImagePair, SearchState};
use pixaview_core::{
    BundledLocalizer, ImagePreviewModel, LocalizationKey, Localizer, Navigator, PreviewState,
    SearchStack, SearchViewModel, StateSubscription,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::command::{Command, HELP};
use crate::config::ViewerConfig;

/// Hands preview requests back to the input loop.
#[derive(Debug)]
struct TerminalNavigator {
    title: String,
    previews: mpsc::UnboundedSender<(ImagePair, usize)>,
}

impl Navigator for TerminalNavigator {
    fn start(&self) {
        println!("== {} ==  (:help for commands)", self.title);
    }

    fn show_preview(&self, pair: ImagePair, selected_index: usize) {
        if self.previews.send((pair, selected_index)).is_err() {
            debug!(target: "viewer", "preview requested after shutdown");
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = ViewerConfig::load().context("loading configuration")?;
    let mut localizer = BundledLocalizer::english();
    if let Some(json) = config.load_strings()? {
        localizer = localizer
            .with_overrides_json(&json)
            .context("parsing string overrides")?;
    }

    let stack = SearchStack::build(config.search)
        .context("building search stack")?
        .with_localizer(Arc::new(localizer));

    let (preview_tx, mut preview_rx) = mpsc::unbounded_channel();
    let navigator = Arc::new(TerminalNavigator {
        title: stack.localizer.lookup(LocalizationKey::SearchTitle),
        previews: preview_tx,
    });
    let view_model = Arc::new(stack.view_model(navigator.clone()));

    navigator.start();
    if let Some(message) = view_model.status_message() {
        println!("{message}");
    }
    let printer = tokio::spawn(print_states(view_model.clone(), view_model.subscribe()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut preview: Option<ImagePreviewModel> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                match Command::parse(line.trim_end()) {
                    Ok(Command::Quit) => break,
                    Ok(command) => handle(command, &view_model, &stack, &mut preview).await,
                    Err(message) => eprintln!("{message}"),
                }
            }
            Some((pair, index)) = preview_rx.recv() => {
                let model = stack.preview(pair, index);
                show_preview(&model, &view_model).await;
                preview = Some(model);
            }
        }
    }

    printer.abort();
    info!(target: "viewer", "exiting");
    Ok(())
}

async fn handle(
    command: Command,
    view_model: &SearchViewModel,
    stack: &SearchStack,
    preview: &mut Option<ImagePreviewModel>,
) {
    match command {
        Command::Text(text) => view_model.text_changed(text),
        Command::Search(text) => view_model.submit(text),
        Command::More => view_model.scrolled_near_end(),
        Command::Open { index, slot } => {
            if !view_model.item_selected(index, slot) {
                eprintln!("no result #{index}");
            }
        }
        Command::Switch => match preview.as_mut() {
            Some(model) => match model.switch_image().await {
                Some(state) => print_preview(model, &state, view_model),
                None => eprintln!("this image has no themed variant"),
            },
            None => eprintln!("open a result first"),
        },
        Command::Purge => {
            stack.cache.clear();
            println!("image cache cleared");
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

async fn show_preview(model: &ImagePreviewModel, view_model: &SearchViewModel) {
    let state = model.load_current().await;
    print_preview(model, &state, view_model);
}

fn print_preview(model: &ImagePreviewModel, state: &PreviewState, view_model: &SearchViewModel) {
    println!(
        "-- {} ({:?}) --",
        view_model.localize(LocalizationKey::PreviewTitle),
        model.slot()
    );
    println!(
        "{}: {}",
        view_model.localize(LocalizationKey::PreviewTags),
        model.current_tags()
    );
    println!("{}", model.current_full_size_url());

    match state {
        PreviewState::Loaded(bytes) => println!(
            "{}: {} bytes",
            view_model.localize(LocalizationKey::PreviewImageInfo),
            bytes.len()
        ),
        PreviewState::Failure => {
            println!("{}", view_model.localize(LocalizationKey::ErrorImageLoad))
        }
        PreviewState::Loading => {}
    }
}

async fn print_states(view_model: Arc<SearchViewModel>, mut states: StateSubscription) {
    let mut shown = 0;
    while let Some(state) = states.recv().await {
        match &state {
            SearchState::Loading { first_page } => {
                if *first_page {
                    shown = 0;
                }
                println!("{}", view_model.localize(LocalizationKey::CommonLoading));
            }
            SearchState::Loaded { .. } => {
                let pairs = view_model.pairs();
                for (index, pair) in pairs.iter().enumerate().skip(shown) {
                    let themed = if pair.themed.is_some() { "  [+themed]" } else { "" };
                    println!("{index:>4}  {}{themed}", pair.primary.tags);
                }
                shown = pairs.len();
            }
            SearchState::Empty | SearchState::NoResults | SearchState::Error(_) => {
                if let Some(message) = view_model.message_for(&state) {
                    println!("{message}");
                }
            }
        }
    }
}
