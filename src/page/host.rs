use crate::foundation::core::Rect;

/// Opaque handle to an element owned by a [`PageHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// How loudly a failed lookup is reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LookupLog {
    /// Missing elements are expected.
    Silent,
    /// Missing elements are logged as warnings.
    Warn,
    /// Missing elements are logged as errors.
    #[default]
    Error,
}

/// Elements the effect looks up, each bound to a fixed attribute selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Drawing surface. Required.
    Canvas,
    /// Element whose scroll range drives progress. Required.
    ScrollTarget,
    /// Inline vector logo that gets rasterized. Required.
    Logo,
    /// Layout-only logo mark, read for its on-screen width.
    LogoPlaceholder,
    /// Element faded out once the effect is ready.
    Placeholder,
    /// Background video (re)started on load and resize.
    Video,
}

impl Role {
    /// Attribute selector used for lookup.
    pub fn selector(self) -> &'static str {
        match self {
            Self::Canvas => "canvas[hero-video-reveal=canvas]",
            Self::ScrollTarget => "[hero-video-reveal=scroll-target]",
            Self::Logo => "svg[hero-video-reveal=logo]",
            Self::LogoPlaceholder => "svg[hero-video-reveal=logo-placeholder]",
            Self::Placeholder => "[hero-video-reveal=placeholder]",
            Self::Video => "video[hero-video-reveal=video]",
        }
    }

    /// Whether the effect cannot run without this element.
    pub fn is_required(self) -> bool {
        matches!(self, Self::Canvas | Self::ScrollTarget | Self::Logo)
    }
}

/// The page the effect is mounted on.
///
/// Geometry is in CSS pixels. Layout boxes are in document coordinates (scroll offset
/// included) so scroll ranges can be resolved against them.
pub trait PageHost {
    /// Find an element by selector, logging a miss according to `log`.
    fn lookup(&self, selector: &str, log: LookupLog) -> Option<ElementId>;

    /// Current layout box of an element.
    fn layout_box(&self, element: ElementId) -> Option<Rect>;

    /// Layout box of the element's parent.
    fn parent_box(&self, element: ElementId) -> Option<Rect>;

    /// Self-contained markup of an inline `<svg>` element.
    fn serialize_svg(&self, element: ElementId) -> Option<String>;

    /// Trimmed value of a page-level custom property; `None` when unset or empty.
    fn custom_property(&self, name: &str) -> Option<String>;

    /// Viewport height in CSS pixels.
    fn viewport_height(&self) -> f64;

    /// Start (or restart) playback of a video element.
    fn play_video(&mut self, element: ElementId);

    /// Fade an element to zero opacity over `duration_secs`.
    fn fade_out(&mut self, element: ElementId, duration_secs: f64);
}
