//! LearnerEngine: validates and dispatches behavioral events onto the
//! learner graph, invalidates the cached visualization, and signals the
//! activity scheduler.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use parallax_cache::CacheFacade;
use parallax_core::bus::{ISignalBus, Signal};
use parallax_core::errors::ParallaxResult;
use parallax_core::events::{self, EventEnvelope, LearnerEvent};
use parallax_core::graph::TopicGraph;
use parallax_core::models::{EventReceipt, GraphView};
use parallax_core::traits::IGraphStore;

use crate::handlers;
use crate::visualization;

/// The main learner-graph engine.
pub struct LearnerEngine {
    store: Arc<dyn IGraphStore>,
    cache: Arc<CacheFacade>,
    bus: Option<Arc<dyn ISignalBus>>,
}

impl LearnerEngine {
    pub fn new(store: Arc<dyn IGraphStore>, cache: Arc<CacheFacade>) -> Self {
        Self {
            store,
            cache,
            bus: None,
        }
    }

    /// Attach a signal bus; every graph mutation publishes
    /// `LearnerGraphUpdated`.
    pub fn with_bus(mut self, bus: Arc<dyn ISignalBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Validate a raw ingress payload and handle it. Unknown event kinds
    /// log and no-op; malformed payloads are Validation errors.
    pub fn handle_raw(&self, raw: &Value) -> ParallaxResult<EventReceipt> {
        match events::parse_envelope(raw)? {
            Some(envelope) => self.handle(&envelope),
            None => {
                warn!("dropping event of unknown kind");
                Ok(EventReceipt::noop("unknown event kind"))
            }
        }
    }

    /// Handle a validated envelope: find-or-create the learner graph,
    /// dispatch by event kind, then invalidate the visualization cache and
    /// emit the learner-updated signal.
    pub fn handle(&self, envelope: &EventEnvelope) -> ParallaxResult<EventReceipt> {
        let graph = self.find_or_create_graph(&envelope.user_id, &envelope.content_id)?;

        let mutation = match &envelope.event {
            LearnerEvent::Highlight(event) => {
                handlers::highlight::apply(self.store.as_ref(), &graph.id, event)?
            }
            LearnerEvent::CornellSynthesis(event) => {
                handlers::synthesis::apply(self.store.as_ref(), &graph.id, event)?
            }
            LearnerEvent::MissionCompleted(event) => {
                handlers::mission::apply(self.store.as_ref(), &graph.id, event)?
            }
        };

        self.cache
            .invalidate_visualization(&envelope.user_id, &envelope.content_id);
        if let Some(bus) = &self.bus {
            bus.publish(Signal::LearnerGraphUpdated {
                user_id: envelope.user_id.clone(),
                content_id: envelope.content_id.clone(),
            });
        }

        info!(
            user_id = %envelope.user_id,
            content_id = %envelope.content_id,
            nodes = mutation.nodes_touched,
            edges = mutation.edges_touched,
            "learner event applied"
        );
        Ok(EventReceipt {
            graph_id: graph.id,
            nodes_touched: mutation.nodes_touched,
            edges_touched: mutation.edges_touched,
            warnings: mutation.warnings,
        })
    }

    /// Merged baseline/learner view, cache-first with a 5-minute TTL.
    pub fn get_visualization(&self, user_id: &str, content_id: &str) -> ParallaxResult<GraphView> {
        if let Some(cached) = self.cache.visualization(user_id, content_id) {
            return Ok(cached);
        }

        let view = visualization::render(self.store.as_ref(), user_id, content_id)?;
        if view.metadata.baseline_graph_id.is_some() {
            self.cache.store_visualization(user_id, content_id, &view);
        }
        Ok(view)
    }

    fn find_or_create_graph(&self, user_id: &str, content_id: &str) -> ParallaxResult<TopicGraph> {
        if let Some(graph) = self.store.find_learner_graph(user_id, content_id)? {
            return Ok(graph);
        }
        let graph = TopicGraph::learner(user_id, content_id);
        self.store.create_graph(&graph)?;
        Ok(graph)
    }
}
