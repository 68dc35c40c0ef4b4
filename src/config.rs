//! Engine configuration: storage mode, capacities, metrics, and trace toggles.
//!
//! [`EngineConfig`] follows the builder style used across the crate. The two
//! presets mirror the two deployment targets: [`EngineConfig::desktop`] grows
//! on the heap, [`EngineConfig::embedded`] pre-reserves a fixed pool and never
//! grows after construction.

use crate::geometry::Size;
use crate::layout::LayoutConfig;
use crate::style::TypeMatching;

// ---------------------------------------------------------------------------
// StorageMode
// ---------------------------------------------------------------------------

/// Backing storage for the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Unbounded heap growth. Child lists grow geometrically.
    #[default]
    Heap,
    /// Fixed pool reserved up front. Creation fails once `max_nodes` nodes are
    /// alive, attach fails once a parent holds `max_children` children.
    Pool { max_nodes: usize, max_children: usize },
}

impl StorageMode {
    /// The pool used on microcontroller targets.
    pub const EMBEDDED: StorageMode = StorageMode::Pool { max_nodes: 64, max_children: 32 };
}

// ---------------------------------------------------------------------------
// TraceFlags
// ---------------------------------------------------------------------------

/// Diagnostic trace toggles. All off by default.
///
/// Each toggle gates `tracing::trace!` events for one subsystem. They never
/// change behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceFlags {
    /// Per-node layout results.
    pub layout: bool,
    /// Node creation, attachment, and destruction.
    pub components: bool,
    /// Hit-test coordinate accumulation.
    pub coordinates: bool,
    /// Commands pushed to the sink.
    pub commands: bool,
}

impl TraceFlags {
    /// Every toggle on.
    pub const ALL: TraceFlags = TraceFlags {
        layout: true,
        components: true,
        coordinates: true,
        commands: true,
    };

    /// Read the toggles from `LOOM_TRACE_LAYOUT`, `LOOM_TRACE_COMPONENTS`,
    /// `LOOM_TRACE_COORDINATES` and `LOOM_TRACE_COMMANDS`.
    ///
    /// A variable enables its toggle when it is set to anything other than
    /// an empty string or `0`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = |key: &str| lookup(key).is_some_and(|v| !v.is_empty() && v != "0");
        Self {
            layout: enabled("LOOM_TRACE_LAYOUT"),
            components: enabled("LOOM_TRACE_COMPONENTS"),
            coordinates: enabled("LOOM_TRACE_COORDINATES"),
            commands: enabled("LOOM_TRACE_COMMANDS"),
        }
    }
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`Screen`](crate::screen::Screen) and its subsystems.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Node arena storage.
    pub storage: StorageMode,
    /// Surface size handed to the root at layout time.
    pub surface: Size,
    /// Generic handlers allowed per node.
    pub max_handlers: usize,
    /// Rules allowed in the style table.
    pub max_style_rules: usize,
    /// Commands the sink accepts per frame before dropping.
    pub command_capacity: usize,
    /// Text and placeholder metrics for intrinsic sizing.
    pub layout: LayoutConfig,
    /// How type selectors match.
    pub type_matching: TypeMatching,
    /// Diagnostic trace toggles.
    pub trace: TraceFlags,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::desktop()
    }
}

impl EngineConfig {
    /// Create a new default (desktop) config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Heap storage, 800×600 surface.
    pub fn desktop() -> Self {
        Self {
            storage: StorageMode::Heap,
            surface: Size::new(800.0, 600.0),
            max_handlers: 8,
            max_style_rules: 512,
            command_capacity: 8192,
            layout: LayoutConfig::default(),
            type_matching: TypeMatching::default(),
            trace: TraceFlags::default(),
        }
    }

    /// Fixed 64-node pool, 320×240 surface, small command buffer.
    pub fn embedded() -> Self {
        Self {
            storage: StorageMode::EMBEDDED,
            surface: Size::new(320.0, 240.0),
            command_capacity: 1024,
            ..Self::desktop()
        }
    }

    /// Set the storage mode (builder).
    pub fn with_storage(mut self, storage: StorageMode) -> Self {
        self.storage = storage;
        self
    }

    /// Set the surface size (builder).
    pub fn with_surface(mut self, width: f32, height: f32) -> Self {
        self.surface = Size::new(width, height);
        self
    }

    /// Set the per-node handler capacity (builder).
    pub fn with_max_handlers(mut self, max: usize) -> Self {
        self.max_handlers = max;
        self
    }

    /// Set the style table capacity (builder).
    pub fn with_max_style_rules(mut self, max: usize) -> Self {
        self.max_style_rules = max;
        self
    }

    /// Set the command sink capacity (builder).
    pub fn with_command_capacity(mut self, capacity: usize) -> Self {
        self.command_capacity = capacity;
        self
    }

    /// Set the layout metrics (builder).
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the type selector matching mode (builder).
    pub fn with_type_matching(mut self, matching: TypeMatching) -> Self {
        self.type_matching = matching;
        self
    }

    /// Set the trace toggles (builder).
    pub fn with_trace(mut self, trace: TraceFlags) -> Self {
        self.trace = trace;
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
