//! Runs catalog requests off the UI thread
//!
//! Requests are spawned on a tokio runtime owned by the GUI. Each result is
//! posted back over a channel together with the request it answers, and the
//! UI is asked to repaint so `drain` picks it up on the next frame.

use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{Context, Result};
use eframe::egui;
use tracing::debug;

use crate::catalog::{Catalog, CatalogClient};
use crate::error::CatalogError;
use crate::gallery::PageRequest;
use crate::types::Artwork;

pub type PageResult = (PageRequest, Result<Vec<Artwork>, CatalogError>);

pub struct CatalogWorker {
    runtime: tokio::runtime::Runtime,
    client: CatalogClient,
    tx: Sender<PageResult>,
    rx: Receiver<PageResult>,
}

impl CatalogWorker {
    pub fn new(client: CatalogClient) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("catalog-worker")
            .enable_all()
            .build()
            .context("Failed to start async runtime for catalog requests")?;
        let (tx, rx) = mpsc::channel();
        Ok(Self { runtime, client, tx, rx })
    }

    /// Fire `request`; the result arrives through `drain`
    pub fn dispatch(&self, request: PageRequest, ctx: &egui::Context) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        debug!(ticket = request.ticket, page = request.page, "Dispatching catalog request");

        self.runtime.spawn(async move {
            let result = client.fetch_page(request.page, &request.query).await;
            if tx.send((request, result)).is_err() {
                debug!("Gallery closed before catalog response arrived");
                return;
            }
            ctx.request_repaint();
        });
    }

    /// Results that arrived since the last call
    pub fn drain(&self) -> Vec<PageResult> {
        self.rx.try_iter().collect()
    }
}
