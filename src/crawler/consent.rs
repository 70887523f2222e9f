//! Cookie/consent banner dismissal for rendered pages
//!
//! Two tiers, best effort:
//! 1. Click the first displayed and enabled control matched by an ordered list
//!    of known "accept" locators.
//! 2. If nothing was clicked, strip every element whose text mentions "cookie".
//!
//! Nothing in here ever returns an error to the fetcher.

use crate::ConsentError;
use std::fmt;
use std::time::Duration;
use thirtyfour::{By, WebDriver};

/// Pause after a successful click so the banner can animate away
pub const CLICK_PAUSE: Duration = Duration::from_millis(500);

/// Text whose presence marks an element for removal in the fallback pass
pub const OVERLAY_NEEDLE: &str = "cookie";

/// One way of finding a consent "accept" control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentLocator {
    /// CSS selector
    Css(&'static str),
    /// Element id
    Id(&'static str),
    /// `<button>` whose text contains the lowercase needle, ignoring case
    ButtonText(&'static str),
}

impl ConsentLocator {
    /// Converts the locator into a WebDriver query
    pub fn to_by(&self) -> By {
        match self {
            Self::Css(selector) => By::Css(*selector),
            Self::Id(id) => By::Id(*id),
            Self::ButtonText(needle) => By::XPath(button_text_xpath(needle)),
        }
    }
}

impl fmt::Display for ConsentLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(selector) => write!(f, "css={}", selector),
            Self::Id(id) => write!(f, "id={}", id),
            Self::ButtonText(needle) => write!(f, "button-text~={}", needle),
        }
    }
}

/// Known consent controls, tried in order; the first actionable one wins
pub const CONSENT_LOCATORS: &[ConsentLocator] = &[
    // data-action attributes
    ConsentLocator::Css("button[data-action='consent'][data-action-type='accept']"),
    ConsentLocator::Css("button[data-action-type='accept']"),
    ConsentLocator::Css("button[data-action='accept']"),
    // common ids and classes
    ConsentLocator::Css("button#accept"),
    ConsentLocator::Css("button.accept"),
    ConsentLocator::Css("button.uc-accept-button"),
    ConsentLocator::Id("accept"),
    // button text
    ConsentLocator::ButtonText("allow all"),
    ConsentLocator::ButtonText("accetta"),
    ConsentLocator::ButtonText("accept"),
];

/// XPath matching buttons whose text contains `needle`, ignoring ASCII case
fn button_text_xpath(needle: &str) -> String {
    format!(
        "//button[contains(translate(normalize-space(.), 'ABCDEFGHIJKLMNOPQRSTUVWXYZ', \
         'abcdefghijklmnopqrstuvwxyz'), '{}')]",
        needle.to_lowercase()
    )
}

/// What the dismissal procedure ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentOutcome {
    /// A control found by this locator was clicked
    Clicked(ConsentLocator),
    /// No control was clicked; the removal pass ran
    Removed,
    /// No control was clicked and the removal pass failed
    Failed,
}

/// The page operations dismissal needs
#[allow(async_fn_in_trait)]
pub trait ConsentSurface {
    /// Clicks the first displayed and enabled element the locator matches
    ///
    /// Returns `Ok(false)` when nothing actionable was found.
    async fn click_first_actionable(&self, locator: &ConsentLocator) -> Result<bool, ConsentError>;

    /// Removes every element whose rendered text contains `needle`, ignoring case
    async fn remove_elements_mentioning(&self, needle: &str) -> Result<(), ConsentError>;
}

/// Runs the two-tier dismissal heuristic against a page
///
/// A locator that errors is treated like one that found nothing; the next
/// locator is tried. All failures are logged and swallowed.
pub async fn dismiss_consent<S: ConsentSurface>(surface: &S, pause: Duration) -> ConsentOutcome {
    for locator in CONSENT_LOCATORS {
        match surface.click_first_actionable(locator).await {
            Ok(true) => {
                tracing::info!("Consent banner dismissed with locator {}", locator);
                tokio::time::sleep(pause).await;
                return ConsentOutcome::Clicked(*locator);
            }
            Ok(false) => {}
            Err(e) => tracing::debug!("Consent locator {} failed: {}", locator, e),
        }
    }

    match surface.remove_elements_mentioning(OVERLAY_NEEDLE).await {
        Ok(()) => {
            tracing::info!("No consent button found, removed '{}' overlays", OVERLAY_NEEDLE);
            ConsentOutcome::Removed
        }
        Err(e) => {
            tracing::warn!("Consent banner handling failed: {}", e);
            ConsentOutcome::Failed
        }
    }
}

/// Elements the removal pass may delete: descendants of `body` only, so
/// `html`, `head` and `body` survive
const REMOVAL_SCOPE: &str = "body *";

/// Script body for the removal pass; `{needle}` is substituted as a JS string
/// and `{scope}` with the selector
const REMOVE_SCRIPT: &str = r#"
const needle = {needle};
for (const el of Array.from(document.querySelectorAll({scope}))) {
    if (el.isConnected && el.innerText && el.innerText.toLowerCase().includes(needle)) {
        el.remove();
    }
}
"#;

fn removal_script(needle: &str) -> String {
    REMOVE_SCRIPT
        .replace("{needle}", &format!("{:?}", needle.to_lowercase()))
        .replace("{scope}", &format!("{:?}", REMOVAL_SCOPE))
}

impl ConsentSurface for WebDriver {
    async fn click_first_actionable(&self, locator: &ConsentLocator) -> Result<bool, ConsentError> {
        let locator_error = |e: thirtyfour::error::WebDriverError| ConsentError::Locator {
            locator: locator.to_string(),
            message: e.to_string(),
        };

        let elements = self.find_all(locator.to_by()).await.map_err(locator_error)?;

        for element in elements {
            let displayed = element.is_displayed().await.map_err(locator_error)?;
            let enabled = element.is_enabled().await.map_err(locator_error)?;
            if displayed && enabled {
                element.click().await.map_err(locator_error)?;
                return Ok(true);
            }
        }

        Ok(false)
    }

    async fn remove_elements_mentioning(&self, needle: &str) -> Result<(), ConsentError> {
        self.execute(removal_script(needle), Vec::new())
            .await
            .map(|_| ())
            .map_err(|e| ConsentError::Script(e.to_string()))
    }
}
