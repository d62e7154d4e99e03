use crate::animation::tween::Tween;
use crate::assets::logo::LogoElement;
use crate::assets::object_url::ObjectUrls;
use crate::assets::raster::LogoRasterizer;
use crate::effect::config::RevealConfig;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Rect, Size};
use crate::foundation::error::RevealResult;
use crate::page::host::{ElementId, LookupLog, PageHost, Role};
use crate::render::mask::{AnchoredScaler, MaskRenderer};
use crate::render::surface::Surface;
use crate::scroll::trigger::ScrollTrigger;

/// Lifecycle of a mounted effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    /// Mounted but not loaded, or torn down.
    Uninitialized,
    /// Waiting for the logo decode tagged with `generation`.
    Loading {
        /// Generation of the decode that will be accepted.
        generation: u64,
    },
    /// Logo decoded; mask and scroll driver are live.
    Ready,
}

#[derive(Clone, Copy, Debug)]
struct Elements {
    canvas: ElementId,
    scroll_target: ElementId,
    logo: ElementId,
    logo_placeholder: Option<ElementId>,
    placeholder: Option<ElementId>,
    video: Option<ElementId>,
}

impl Elements {
    fn resolve(host: &impl PageHost) -> Option<Self> {
        let required = |role: Role| host.lookup(role.selector(), LookupLog::Error);
        let optional = |role: Role| host.lookup(role.selector(), LookupLog::Warn);

        let canvas = required(Role::Canvas);
        let scroll_target = required(Role::ScrollTarget);
        let logo = required(Role::Logo);
        let logo_placeholder = optional(Role::LogoPlaceholder);
        let placeholder = optional(Role::Placeholder);
        let video = optional(Role::Video);

        Some(Self {
            canvas: canvas?,
            scroll_target: scroll_target?,
            logo: logo?,
            logo_placeholder,
            placeholder,
            video,
        })
    }
}

/// One mounted hero reveal effect.
///
/// Owns the renderer, the rasterizer, the current scaler and the scroll trigger. The host
/// forwards page events to it:
///
/// 1. [`HeroReveal::on_load`] once the page has loaded,
/// 2. [`HeroReveal::run_pending`] on every event loop turn, to complete queued decodes,
/// 3. [`HeroReveal::on_scroll`] and [`HeroReveal::on_resize`] as they happen.
///
/// Failures never propagate out of these handlers; the effect degrades to a plain fill.
#[derive(Debug)]
pub struct HeroReveal<H: PageHost> {
    host: H,
    config: RevealConfig,
    elements: Elements,
    renderer: MaskRenderer,
    rasterizer: LogoRasterizer,
    scaler: Option<AnchoredScaler>,
    trigger: Option<ScrollTrigger>,
    state: RevealState,
    generation: u64,
    resize_registered: bool,
    placeholder_hidden: bool,
    last_scroll: Option<f64>,
    current_width: Option<f64>,
    repaints: u64,
}

impl<H: PageHost> HeroReveal<H> {
    /// Look up the effect's elements on `host`.
    ///
    /// Returns `Ok(None)` when the canvas, scroll target or logo is missing; nothing is drawn
    /// in that case. Errors are reserved for an invalid `config`.
    pub fn mount(host: H, config: RevealConfig) -> RevealResult<Option<Self>> {
        config.validate()?;
        let Some(elements) = Elements::resolve(&host) else {
            tracing::warn!("hero reveal not mounted: required element missing");
            return Ok(None);
        };

        let fill = match host.custom_property(&config.fill_color_property) {
            Some(value) => Rgba8::parse_css(&value).unwrap_or_else(|e| {
                tracing::warn!(%value, error = %e, "unusable fill color, using default");
                config.default_fill_color
            }),
            None => config.default_fill_color,
        };

        Ok(Some(Self {
            renderer: MaskRenderer::new(fill)?,
            rasterizer: LogoRasterizer::new(config.raster_scale),
            host,
            config,
            elements,
            scaler: None,
            trigger: None,
            state: RevealState::Uninitialized,
            generation: 0,
            resize_registered: false,
            placeholder_hidden: false,
            last_scroll: None,
            current_width: None,
            repaints: 0,
        }))
    }

    /// Page load: paint the resting fill, start the logo decode, play the video and
    /// register for resizes.
    pub fn on_load(&mut self) {
        if self.state != RevealState::Uninitialized {
            tracing::debug!(state = ?self.state, "on_load ignored: already loaded");
            return;
        }
        self.reset_surface();
        self.begin_decode();
        self.play_video();

        if self.resize_registered {
            tracing::debug!("resize handler already registered");
        } else {
            self.resize_registered = true;
        }
    }

    /// Complete every queued decode. Returns how many completions were processed.
    ///
    /// Completions from superseded generations are discarded.
    pub fn run_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Some(done) = self.rasterizer.next_completion() {
            processed += 1;
            if self.state
                != (RevealState::Loading {
                    generation: done.generation,
                })
            {
                tracing::debug!(generation = done.generation, "stale logo decode ignored");
                continue;
            }
            match done.result {
                Ok(logo) => {
                    self.renderer.set_logo(logo);
                    self.state = RevealState::Ready;
                    self.initialize(true);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "logo decode failed; mask disabled");
                }
            }
        }
        processed
    }

    /// Viewport resize: rebuild surface, mask and scroll driver.
    ///
    /// The surface always follows the container. Without a usable logo it is only refilled.
    pub fn on_resize(&mut self) {
        if !self.resize_registered {
            return;
        }
        match self.state {
            RevealState::Ready if !self.config.rerasterize_on_resize => self.initialize(false),
            state => {
                self.reset_surface();
                if self.config.rerasterize_on_resize && state != RevealState::Uninitialized {
                    self.dispose_animation();
                    self.scaler = None;
                    self.begin_decode();
                }
            }
        }
        self.play_video();
    }

    /// Scroll position changed. Returns the cut-out rect when the mask was repainted.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<Rect> {
        self.last_scroll = Some(scroll_y);
        let width = self.trigger.as_mut()?.update(scroll_y)?;
        self.repaint(width)
    }

    /// Kill the scroll driver, drop the mask and return to [`RevealState::Uninitialized`].
    pub fn teardown(&mut self) {
        self.dispose_animation();
        self.scaler = None;
        self.renderer.clear_logo();
        self.renderer.fill();
        self.state = RevealState::Uninitialized;
        self.resize_registered = false;
        self.current_width = None;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Drawing surface.
    pub fn surface(&self) -> &Surface {
        self.renderer.surface()
    }

    /// Active scaler, once the logo is ready.
    pub fn scaler(&self) -> Option<&AnchoredScaler> {
        self.scaler.as_ref()
    }

    /// Active scroll trigger.
    pub fn trigger(&self) -> Option<&ScrollTrigger> {
        self.trigger.as_ref()
    }

    /// Width of the most recent paint.
    pub fn current_width(&self) -> Option<f64> {
        self.current_width
    }

    /// Number of mask repaints so far.
    pub fn repaint_count(&self) -> u64 {
        self.repaints
    }

    /// Resolved mask fill color.
    pub fn fill_color(&self) -> Rgba8 {
        self.renderer.fill_color()
    }

    /// Object URL bookkeeping of the rasterizer.
    pub fn object_urls(&self) -> &ObjectUrls {
        self.rasterizer.urls()
    }

    /// Effect configuration.
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// The page.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the page, e.g. to change layout before a resize.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn begin_decode(&mut self) {
        let Some(markup) = self.host.serialize_svg(self.elements.logo) else {
            tracing::warn!("logo element could not be serialized");
            return;
        };
        let client = self
            .host
            .layout_box(self.elements.logo)
            .map(|r| r.size())
            .unwrap_or(Size::ZERO);
        let element = match LogoElement::from_markup(markup, client) {
            Ok(element) => element,
            Err(e) => {
                tracing::warn!(error = %e, "logo markup unusable");
                return;
            }
        };
        self.generation += 1;
        self.rasterizer.begin(&element, self.generation);
        self.state = RevealState::Loading {
            generation: self.generation,
        };
    }

    #[tracing::instrument(skip(self))]
    fn initialize(&mut self, first_time: bool) {
        let container = self.container_size();
        if let Err(e) = self.renderer.initialize_surface(container) {
            tracing::warn!(error = %e, "surface initialization failed");
            return;
        }

        let initial_width = self
            .elements
            .logo_placeholder
            .and_then(|id| self.host.layout_box(id))
            .map(|r| r.width())
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(self.config.fallback_initial_width);

        self.scaler = self
            .renderer
            .anchored_scaler(initial_width, self.config.anchor);
        self.repaint(initial_width);

        self.dispose_animation();
        self.trigger = self.build_trigger(initial_width);
        if let Some(scroll_y) = self.last_scroll {
            self.on_scroll(scroll_y);
        }

        if first_time && !self.placeholder_hidden {
            if let Some(placeholder) = self.elements.placeholder {
                self.host
                    .fade_out(placeholder, self.config.placeholder_fade_secs);
            }
            self.placeholder_hidden = true;
        }
    }

    fn build_trigger(&self, initial_width: f64) -> Option<ScrollTrigger> {
        let end_percentage = self
            .host
            .custom_property(&self.config.end_percentage_property)
            .unwrap_or_else(|| self.config.default_end_percentage.clone());
        let range = self.config.scroll_range(&end_percentage).or_else(|e| {
            tracing::warn!(%end_percentage, error = %e, "unusable end percentage, using default");
            self.config
                .scroll_range(&self.config.default_end_percentage)
        });
        let (range, ease) = match (range, self.config.ease()) {
            (Ok(range), Ok(ease)) => (range, ease),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "scroll driver not created");
                return None;
            }
        };

        let surface_height = f64::from(self.renderer.surface().height());
        let tween = Tween {
            from: initial_width,
            to: self.config.terminal_width.resolve(surface_height),
            ease,
        };
        let trigger_box = self
            .host
            .layout_box(self.elements.scroll_target)
            .unwrap_or_default();
        Some(ScrollTrigger::new(
            tween,
            range,
            trigger_box,
            self.host.viewport_height(),
        ))
    }

    fn dispose_animation(&mut self) {
        if let Some(mut trigger) = self.trigger.take() {
            trigger.kill();
            tracing::debug!("previous scroll trigger disposed");
        }
    }

    fn repaint(&mut self, width: f64) -> Option<Rect> {
        self.current_width = Some(width);
        self.repaints += 1;
        self.renderer.repaint(self.scaler.as_ref(), width)
    }

    fn reset_surface(&mut self) {
        let container = self.container_size();
        if let Err(e) = self.renderer.initialize_surface(container) {
            tracing::warn!(error = %e, "surface initialization failed");
        }
    }

    fn container_size(&self) -> Size {
        self.host
            .parent_box(self.elements.canvas)
            .or_else(|| self.host.layout_box(self.elements.canvas))
            .map(|r| r.size())
            .unwrap_or(Size::ZERO)
    }

    fn play_video(&mut self) {
        if let Some(video) = self.elements.video {
            self.host.play_video(video);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/reveal.rs"]
mod tests;
