use crate::effects::{ElementId, IntersectionEntry};
use crate::filter::{Filter, FilterControls};
use crate::renderer::PortfolioRenderer;
use crate::rendering::GridContent;
use crate::source::ProjectSource;
use crate::{Error, PortfolioConfig, Project, Result};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;
use tokio::sync::oneshot;

enum Command {
    Load(oneshot::Sender<Result<usize>>),
    Filter(Filter, oneshot::Sender<GridContent>),
    Render(Vec<Project>, oneshot::Sender<GridContent>),
    Intersect(Vec<IntersectionEntry>, oneshot::Sender<Vec<ElementId>>),
    Advance(Duration, oneshot::Sender<()>),
    Grid(oneshot::Sender<GridContent>),
    Projects(oneshot::Sender<Vec<Project>>),
    Controls(oneshot::Sender<FilterControls>),
    Close(oneshot::Sender<()>),
}

/// An async-friendly portfolio backed by a dedicated worker thread.
///
/// The worker owns the `PortfolioRenderer` and runs commands one at a time
/// in the order they were sent, so a filter issued while a load is still in
/// flight is applied to the loaded collection rather than an empty one.
#[derive(Clone)]
pub struct Portfolio {
    cmd_tx: Sender<Command>,
}

impl Portfolio {
    /// Spawn a portfolio whose source is built on the worker thread.
    ///
    /// Building the source there keeps blocking HTTP clients off the async
    /// runtime.
    pub async fn spawn<F>(config: PortfolioConfig, make_source: F) -> Result<Self>
    where
        F: FnOnce(&PortfolioConfig) -> Result<Box<dyn ProjectSource>> + Send + 'static,
    {
        Self::spawn_with_controls(config, FilterControls::default(), make_source).await
    }

    /// Like [`Portfolio::spawn`], with filter controls whose active marker
    /// follows each filter command.
    pub async fn spawn_with_controls<F>(
        config: PortfolioConfig,
        controls: FilterControls,
        make_source: F,
    ) -> Result<Self>
    where
        F: FnOnce(&PortfolioConfig) -> Result<Box<dyn ProjectSource>> + Send + 'static,
    {
        config.validate()?;

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            let source = match make_source(&config) {
                Ok(s) => s,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };
            let mut renderer = PortfolioRenderer::new(config, source).with_controls(controls);

            let _ = init_tx.send(Ok(()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Load(resp) => {
                        let _ = resp.send(renderer.load());
                    }
                    Command::Filter(filter, resp) => {
                        renderer.filter(&filter);
                        let _ = resp.send(renderer.grid().clone());
                    }
                    Command::Render(subset, resp) => {
                        renderer.render(&subset);
                        let _ = resp.send(renderer.grid().clone());
                    }
                    Command::Intersect(entries, resp) => {
                        let _ = resp.send(renderer.intersect(&entries));
                    }
                    Command::Advance(elapsed, resp) => {
                        renderer.advance(elapsed);
                        let _ = resp.send(());
                    }
                    Command::Grid(resp) => {
                        let _ = resp.send(renderer.grid().clone());
                    }
                    Command::Projects(resp) => {
                        let _ = resp.send(renderer.projects().to_vec());
                    }
                    Command::Controls(resp) => {
                        let _ = resp.send(renderer.controls().clone());
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(());
                        break;
                    }
                }
            }
        });

        init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))??;

        Ok(Self { cmd_tx })
    }

    /// Spawn a portfolio fetching `config.source` over HTTP, resolved
    /// against `base`.
    #[cfg(feature = "http")]
    pub async fn spawn_http(config: PortfolioConfig, base: &str) -> Result<Self> {
        let base = base.to_string();
        Self::spawn(config, move |cfg| {
            let src = crate::source::HttpSource::new(&base, cfg)?;
            Ok(Box::new(src) as Box<dyn ProjectSource>)
        })
        .await
    }

    /// Start a load without waiting for it. Commands sent afterwards still
    /// run after the load completes; the returned receiver yields its result.
    pub fn begin_load(&self) -> Result<oneshot::Receiver<Result<usize>>> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Load(tx))?;
        Ok(rx)
    }

    pub async fn load(&self) -> Result<usize> {
        let rx = self.begin_load()?;
        rx.await
            .map_err(|e| Error::Other(format!("Load canceled: {}", e)))?
    }

    pub async fn filter(&self, filter: Filter) -> Result<GridContent> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Filter(filter, tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Filter canceled: {}", e)))
    }

    pub async fn render(&self, subset: Vec<Project>) -> Result<GridContent> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Render(subset, tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Render canceled: {}", e)))
    }

    pub async fn intersect(&self, entries: Vec<IntersectionEntry>) -> Result<Vec<ElementId>> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Intersect(entries, tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Intersect canceled: {}", e)))
    }

    pub async fn advance(&self, elapsed: Duration) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Advance(elapsed, tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Advance canceled: {}", e)))
    }

    pub async fn grid(&self) -> Result<GridContent> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Grid(tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Grid canceled: {}", e)))
    }

    pub async fn projects(&self) -> Result<Vec<Project>> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Projects(tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Projects canceled: {}", e)))
    }

    pub async fn controls(&self) -> Result<FilterControls> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Controls(tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Controls canceled: {}", e)))
    }

    /// Shut down the worker thread.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Close(tx))?;
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))
    }

    fn send(&self, cmd: Command) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| Error::Other("Portfolio worker has shut down".into()))
    }
}
