//! Off-screen text measurement.
//!
//! [`TextMeasurer`] keeps one hidden `<svg>` container per instance. Each
//! measurement attaches the container to the body if needed, lays the
//! candidate node out inside it, reads the bounding box, and pushes back the
//! container's removal by [`MeasureConfig::cleanup_delay_ms`]. A burst of
//! measurements therefore attaches the container once and detaches it once,
//! after the burst goes quiet.
//!
//! Invariant: at most one container and at most one pending removal exist per
//! measurer, and the pending removal is always cancelled before a new one is
//! scheduled.

#[cfg(test)]
#[path = "measure_test.rs"]
mod measure_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::MeasureConfig;
use crate::consts::{MEASURE_CONTAINER_TAG, NEUTRAL_TEXT_SHADOW, SVG_NS, TEXT_SHADOW};
use crate::dom::{BBox, Dom, Timers};
use crate::error::DomError;

/// Container and cleanup handle, shared with the cleanup callback.
struct MeasureCache<N, P> {
    container: Option<N>,
    cleanup: Option<P>,
}

/// Measures rendered node extents in a hidden container.
pub struct TextMeasurer<D: Dom, T: Timers> {
    dom: D,
    timers: T,
    config: MeasureConfig,
    cache: Rc<RefCell<MeasureCache<D::Node, T::Pending>>>,
}

impl<D: Dom, T: Timers> TextMeasurer<D, T> {
    #[must_use]
    pub fn new(dom: D, timers: T) -> Self {
        Self::with_config(dom, timers, MeasureConfig::default())
    }

    #[must_use]
    pub fn with_config(dom: D, timers: T, config: MeasureConfig) -> Self {
        Self { dom, timers, config, cache: Rc::new(RefCell::new(MeasureCache { container: None, cleanup: None })) }
    }

    #[must_use]
    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    /// Whether the container has been created.
    #[must_use]
    pub fn has_container(&self) -> bool {
        self.cache.borrow().container.is_some()
    }

    /// Whether the container is currently attached to the document.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.cache
            .borrow()
            .container
            .as_ref()
            .is_some_and(|c| self.dom.is_attached(c))
    }

    /// The cached container, if created.
    #[must_use]
    pub fn container(&self) -> Option<D::Node> {
        self.cache.borrow().container.clone()
    }

    /// Rendered width of `node`.
    ///
    /// With `skip_clone` the node is measured in place and only its
    /// `text-shadow` is touched (and restored). Otherwise a deep clone
    /// positioned at the origin is measured and `node` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host cannot create, attach, clone or lay out.
    pub fn measure_width(&self, node: &D::Node, skip_clone: bool) -> Result<f64, DomError> {
        Ok(self.measure(node, skip_clone)?.width)
    }

    /// [`Self::measure_width`] on a clone of `node`.
    ///
    /// # Errors
    ///
    /// See [`Self::measure_width`].
    pub fn measure_width_default(&self, node: &D::Node) -> Result<f64, DomError> {
        self.measure_width(node, false)
    }

    /// Rendered bounding box of `node`. See [`Self::measure_width`].
    ///
    /// # Errors
    ///
    /// See [`Self::measure_width`].
    pub fn measure(&self, node: &D::Node, skip_clone: bool) -> Result<BBox, DomError> {
        let container = self.ensure_container()?;
        let result = if skip_clone {
            self.measure_in_place(&container, node)
        } else {
            self.measure_clone(&container, node)
        };
        self.schedule_cleanup();
        result
    }

    fn measure_clone(&self, container: &D::Node, node: &D::Node) -> Result<BBox, DomError> {
        let clone = self.dom.clone_deep(node)?;
        self.dom.set_attribute(&clone, "x", "0")?;
        self.dom.set_attribute(&clone, "y", "0")?;
        self.dom.set_style(&clone, TEXT_SHADOW, NEUTRAL_TEXT_SHADOW)?;
        self.dom.append_child(container, &clone)?;
        self.ensure_attached(container)?;
        let bbox = self.dom.bbox(&clone);
        self.dom.discard(&clone);
        bbox
    }

    fn measure_in_place(&self, container: &D::Node, node: &D::Node) -> Result<BBox, DomError> {
        let saved_shadow = self.dom.style(node, TEXT_SHADOW)?;
        self.dom.set_style(node, TEXT_SHADOW, NEUTRAL_TEXT_SHADOW)?;

        // A connected node already has layout where it is. A detached one is
        // laid out by lending its whole detached tree to the container, so the
        // node keeps its parent and siblings.
        let bbox = if self.dom.is_attached(node) {
            self.dom.bbox(node)
        } else {
            let root = self.detached_root(node);
            let bbox = self
                .dom
                .append_child(container, &root)
                .and_then(|()| self.ensure_attached(container))
                .and_then(|()| self.dom.bbox(node));
            self.dom.remove(&root);
            bbox
        };

        self.dom.set_style(node, TEXT_SHADOW, &saved_shadow)?;
        bbox
    }

    /// Topmost ancestor of a detached `node` (the node itself when parentless).
    fn detached_root(&self, node: &D::Node) -> D::Node {
        let mut root = node.clone();
        while let Some(parent) = self.dom.parent_node(&root) {
            root = parent;
        }
        root
    }

    /// Get or lazily create the container, attached to the body.
    fn ensure_container(&self) -> Result<D::Node, DomError> {
        let existing = self.cache.borrow().container.clone();
        let container = match existing {
            Some(container) => container,
            None => {
                let container = self.create_container()?;
                self.cache.borrow_mut().container = Some(container.clone());
                container
            }
        };
        self.ensure_attached(&container)?;
        Ok(container)
    }

    fn create_container(&self) -> Result<D::Node, DomError> {
        let container = self.dom.create_element_ns(SVG_NS, MEASURE_CONTAINER_TAG)?;
        for (property, value) in self.config.container_styles() {
            self.dom.set_style(&container, property, &value)?;
        }
        self.dom.add_class(&container, &self.config.container_class)?;
        log::debug!("created measurement container .{}", self.config.container_class);
        Ok(container)
    }

    fn ensure_attached(&self, container: &D::Node) -> Result<(), DomError> {
        if !self.dom.is_attached(container) {
            self.dom.append_to_body(container)?;
        }
        Ok(())
    }

    /// Cancel any pending removal, then schedule a fresh one.
    fn schedule_cleanup(&self) {
        let previous = self.cache.borrow_mut().cleanup.take();
        if let Some(pending) = previous {
            self.timers.cancel(pending);
        }

        let cache = Rc::downgrade(&self.cache);
        let dom = self.dom.clone();
        let pending = self.timers.schedule(
            self.config.cleanup_delay_ms,
            Box::new(move || {
                let Some(cache) = cache.upgrade() else {
                    return;
                };
                // The fired handle stays cached until the next measurement
                // cancels it. A callback must not drop its own timer.
                let cache = cache.borrow();
                if let Some(container) = cache.container.as_ref() {
                    dom.remove(container);
                    log::debug!("detached measurement container");
                }
            }),
        );
        self.cache.borrow_mut().cleanup = Some(pending);
    }
}

impl<D: Dom, T: Timers> Drop for TextMeasurer<D, T> {
    fn drop(&mut self) {
        let pending = self.cache.borrow_mut().cleanup.take();
        if let Some(pending) = pending {
            self.timers.cancel(pending);
        }
        let container = self.cache.borrow_mut().container.take();
        if let Some(container) = container {
            self.dom.remove(&container);
        }
    }
}
