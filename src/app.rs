//! The viewer controller: owns the loaded collection and its derived views,
//! and applies user commands one at a time.
//!
//! File selection and file read completion are two separate steps. Every
//! selection takes a fresh [`LoadTicket`]; a read that completes with an older
//! ticket than the newest one handed out is dropped, so the file the user
//! picked last is the one that ends up loaded.

use core::fmt;

use crate::bounds::{Camera, Viewport, compute_bounds};
use crate::collection::GeometryCollection;
use crate::config::ViewerConfig;
use crate::metrics::{DetailResult, SummaryResult, detail, summarize};
use crate::read_kml;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Clone, Debug)]
pub enum Command {
    /// A file read finished; `contents` is the raw KML text.
    LoadFile { ticket: LoadTicket, contents: String },
    ComputeSummary,
    ComputeDetail,
}

/// User-visible messages. None of these change the loaded state.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    MalformedDocument(String),
    NoCollectionLoaded,
    StaleLoad,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::MalformedDocument(reason) => {
                write!(f, "The file could not be read as KML: {}", reason)
            }
            Notice::NoCollectionLoaded => write!(f, "Load a KML file first."),
            Notice::StaleLoad => write!(f, "A newer file was selected; ignoring this one."),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub collection: Option<GeometryCollection>,
    pub summary: Option<SummaryResult>,
    pub detail: Option<DetailResult>,
    pub viewport: Viewport,
    pub notice: Option<Notice>,
}

impl AppState {
    fn new(config: &ViewerConfig) -> Self {
        Self {
            collection: None,
            summary: None,
            detail: None,
            viewport: Viewport::default_for(config),
            notice: None,
        }
    }
}

pub struct Viewer {
    config: ViewerConfig,
    state: AppState,
    issued: u64,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        let state = AppState::new(&config);
        Self {
            config,
            state,
            issued: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Where the map should look. A projection failure only costs the fitted
    /// view; it is logged and `None` is returned.
    pub fn camera(&self) -> Option<Camera> {
        let c = &self.config;
        match self.state.viewport.camera(c.width_px, c.height_px, c.max_zoom) {
            Ok(camera) => {
                log::info!("view: center {} zoom {}", camera.center, camera.zoom);
                Some(camera)
            }
            Err(e) => {
                log::warn!("no camera: {}", e);
                None
            }
        }
    }

    /// Called when the user selects a file, before its contents are read.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        log::debug!("load #{} started", self.issued);
        LoadTicket(self.issued)
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::LoadFile { ticket, contents } => self.load(ticket, &contents),
            Command::ComputeSummary => {
                let Some(collection) = self.loaded() else {
                    return;
                };
                let summary = summarize(collection);
                log::info!("summary: {} kinds", summary.0.len());
                self.state.summary = Some(summary);
                self.state.notice = None;
            }
            Command::ComputeDetail => {
                let Some(collection) = self.loaded() else {
                    return;
                };
                let detail = detail(collection);
                log::info!("detail: {} line kinds", detail.0.len());
                self.state.detail = Some(detail);
                self.state.notice = None;
            }
        }
    }

    fn loaded(&mut self) -> Option<&GeometryCollection> {
        if self.state.collection.is_none() {
            log::debug!("nothing loaded");
            self.state.notice = Some(Notice::NoCollectionLoaded);
        }
        self.state.collection.as_ref()
    }

    fn load(&mut self, ticket: LoadTicket, contents: &str) {
        if ticket.0 < self.issued {
            log::warn!(
                "load #{} superseded by #{}, discarding",
                ticket.0,
                self.issued
            );
            self.state.notice = Some(Notice::StaleLoad);
            return;
        }
        match read_kml::parse(contents) {
            Ok(collection) => {
                collection.info();
                let bounds = compute_bounds(&collection);
                self.state = AppState {
                    viewport: Viewport::for_bounds(bounds, &self.config),
                    collection: Some(collection),
                    summary: None,
                    detail: None,
                    notice: None,
                };
            }
            Err(e) => {
                log::warn!("load #{} rejected: {}", ticket.0, e);
                self.state.notice = Some(Notice::MalformedDocument(e.to_string()));
            }
        }
    }
}
