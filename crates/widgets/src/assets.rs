//! Static asset data and logical-path resolution for widget icons.

use once_cell::sync::OnceCell;

/// Fallback base when no process-wide base URL has been configured.
const FALLBACK_BASE_URL: &str = "Assets";

static DEFAULT_BASE_URL: OnceCell<String> = OnceCell::new();

/// Configures the process-wide base URL used by [`BaseUrlResolver::default`].
///
/// May be set once, before the first widget is built. Returns `false` if a
/// base was already configured.
pub fn set_default_base_url(base: &str) -> bool {
    DEFAULT_BASE_URL.set(base.to_string()).is_ok()
}

pub fn default_base_url() -> &'static str {
    DEFAULT_BASE_URL
        .get()
        .map(String::as_str)
        .unwrap_or(FALLBACK_BASE_URL)
}

/// Maps a logical resource path to a concrete loadable URL.
pub trait AssetResolver {
    fn resolve(&self, logical_path: &str) -> String;
}

/// Resolver that prefixes logical paths with a base URL, joining with
/// exactly one `/` regardless of trailing or leading slashes.
#[derive(Debug, Clone)]
pub struct BaseUrlResolver {
    base: String,
}

impl BaseUrlResolver {
    pub fn new(base: impl Into<String>) -> Self {
        BaseUrlResolver { base: base.into() }
    }
}

impl Default for BaseUrlResolver {
    fn default() -> Self {
        BaseUrlResolver::new(default_base_url())
    }
}

impl AssetResolver for BaseUrlResolver {
    fn resolve(&self, logical_path: &str) -> String {
        format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            logical_path.trim_start_matches('/')
        )
    }
}

/// Logical paths of the mouse-button illustrations shown in the
/// instructions panel.
pub const MOUSE_LEFT_ICON: &str = "Widgets/Images/NavigationHelp/MouseLeft.svg";
pub const MOUSE_RIGHT_ICON: &str = "Widgets/Images/NavigationHelp/MouseRight.svg";
pub const MOUSE_MIDDLE_ICON: &str = "Widgets/Images/NavigationHelp/MouseMiddle.svg";

/// Vector path for the help "?" glyph, rendered at 32x32 inside the toolbar
/// button.
pub const HELP_GLYPH_PATH: &str = "M16,1.466C7.973,1.466,1.466,7.973,1.466,16c0,8.027,6.507,14.534,14.534,14.534c8.027,0,14.534-6.507,14.534-14.534C30.534,7.973,24.027,1.466,16,1.466z M17.328,24.371h-2.707v-2.596h2.707V24.371zM17.328,19.003v0.858h-2.707v-1.057c0-3.19,3.63-3.696,3.63-5.963c0-1.034-0.924-1.826-2.134-1.826c-1.254,0-2.354,0.924-2.354,0.924l-1.541-1.915c0,0,1.519-1.584,4.137-1.584c2.487,0,4.796,1.54,4.796,4.136C21.156,16.208,17.328,16.627,17.328,19.003z";
