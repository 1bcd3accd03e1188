//! Script bridge for embedded HTML renderers
//!
//! Older renderer generations hide the keyboard whenever a script runs
//! through their public entry point. The bridge avoids that by posting
//! messages straight to the renderer's core, which is reached differently
//! on each generation. [`Capabilities::probe`] inspects the platform once,
//! [`select_bridge`] picks the adapter for its generation, and
//! [`CompatibilityBridge`] reports every failure to a [`FallbackHandler`].

use thiserror::Error;
use tracing::{debug, error};

/// Render core message that evaluates a script
pub const EXECUTE_SCRIPT: u32 = 194;
/// Render core message that loads content with a base URL
pub const LOAD_DATA: u32 = 139;

/// First API level whose history switch lives on the provider
const PROVIDER_API_LEVEL: u32 = 16;
/// First API level that no longer needs the bridge
const UNSUPPORTED_API_LEVEL: u32 = 19;

/// Failures of the script bridge
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformAdapterError {
    #[error("no script bridge for API level {0}")]
    Unsupported(u32),

    #[error("platform internal `{0}` is unavailable")]
    MissingInternal(&'static str),

    #[error("render core rejected message {code}: {reason}")]
    Rejected { code: u32, reason: String },
}

/// Content loaded into the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrlData {
    pub base_url: String,
    pub data: String,
    pub mime_type: String,
    pub encoding: String,
    pub history_url: String,
}

/// Body of a render core message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Script(String),
    Content(BaseUrlData),
}

/// Message queue of the renderer's core
pub trait RenderCore {
    fn post_message(&mut self, code: u32, payload: Payload) -> Result<(), PlatformAdapterError>;
}

/// Owner of the renderer's draw history
pub trait DrawHistory {
    /// Leave history drawing mode before new content is loaded
    fn switch_out_draw_history(&mut self) -> Result<(), PlatformAdapterError>;
}

/// The platform internals a bridge may need
pub trait PlatformInternals {
    fn api_level(&self) -> u32;
    fn render_core(&mut self) -> Option<&mut dyn RenderCore>;
    /// Draw history reached through the view itself
    fn view_history(&mut self) -> Option<&mut dyn DrawHistory>;
    /// Draw history reached through the view's provider
    fn provider_history(&mut self) -> Option<&mut dyn DrawHistory>;
}

/// Renderer API generations the bridge knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// Internals live on the view
    Legacy,
    /// Internals live on a provider object behind the view
    Provider,
}

/// What the probe found on the running platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub api_level: u32,
    pub render_core: bool,
    pub view_history: bool,
    pub provider_history: bool,
}

impl Capabilities {
    pub fn probe(platform: &mut dyn PlatformInternals) -> Self {
        let caps = Self {
            api_level: platform.api_level(),
            render_core: platform.render_core().is_some(),
            view_history: platform.view_history().is_some(),
            provider_history: platform.provider_history().is_some(),
        };
        debug!(?caps, "probed platform");
        caps
    }

    pub fn generation(&self) -> Option<Generation> {
        match self.api_level {
            level if level < PROVIDER_API_LEVEL => Some(Generation::Legacy),
            level if level < UNSUPPORTED_API_LEVEL => Some(Generation::Provider),
            _ => None,
        }
    }
}

/// Script execution and content loading for one renderer generation
pub trait ScriptBridge {
    fn generation(&self) -> Generation;

    fn execute_script(
        &self,
        platform: &mut dyn PlatformInternals,
        source: &str,
    ) -> Result<(), PlatformAdapterError>;

    fn load_content(
        &self,
        platform: &mut dyn PlatformInternals,
        content: &BaseUrlData,
    ) -> Result<(), PlatformAdapterError>;
}

fn post(
    platform: &mut dyn PlatformInternals,
    code: u32,
    payload: Payload,
) -> Result<(), PlatformAdapterError> {
    platform
        .render_core()
        .ok_or(PlatformAdapterError::MissingInternal("render core"))?
        .post_message(code, payload)
}

/// Bridge for renderers below the provider generation
pub struct LegacyViewBridge;

impl ScriptBridge for LegacyViewBridge {
    fn generation(&self) -> Generation {
        Generation::Legacy
    }

    fn execute_script(
        &self,
        platform: &mut dyn PlatformInternals,
        source: &str,
    ) -> Result<(), PlatformAdapterError> {
        post(platform, EXECUTE_SCRIPT, Payload::Script(source.to_string()))
    }

    fn load_content(
        &self,
        platform: &mut dyn PlatformInternals,
        content: &BaseUrlData,
    ) -> Result<(), PlatformAdapterError> {
        platform
            .view_history()
            .ok_or(PlatformAdapterError::MissingInternal("view draw history"))?
            .switch_out_draw_history()?;
        post(platform, LOAD_DATA, Payload::Content(content.clone()))
    }
}

/// Bridge for renderers whose internals sit behind a provider
pub struct ProviderBridge;

impl ScriptBridge for ProviderBridge {
    fn generation(&self) -> Generation {
        Generation::Provider
    }

    fn execute_script(
        &self,
        platform: &mut dyn PlatformInternals,
        source: &str,
    ) -> Result<(), PlatformAdapterError> {
        post(platform, EXECUTE_SCRIPT, Payload::Script(source.to_string()))
    }

    fn load_content(
        &self,
        platform: &mut dyn PlatformInternals,
        content: &BaseUrlData,
    ) -> Result<(), PlatformAdapterError> {
        platform
            .provider_history()
            .ok_or(PlatformAdapterError::MissingInternal("provider draw history"))?
            .switch_out_draw_history()?;
        post(platform, LOAD_DATA, Payload::Content(content.clone()))
    }
}

/// Pick the bridge for the probed platform
pub fn select_bridge(caps: &Capabilities) -> Result<Box<dyn ScriptBridge>, PlatformAdapterError> {
    let generation = caps
        .generation()
        .ok_or(PlatformAdapterError::Unsupported(caps.api_level))?;
    if !caps.render_core {
        return Err(PlatformAdapterError::MissingInternal("render core"));
    }

    match generation {
        Generation::Legacy if caps.view_history => Ok(Box::new(LegacyViewBridge)),
        Generation::Legacy => Err(PlatformAdapterError::MissingInternal("view draw history")),
        Generation::Provider if caps.provider_history => Ok(Box::new(ProviderBridge)),
        Generation::Provider => {
            Err(PlatformAdapterError::MissingInternal("provider draw history"))
        }
    }
}

/// Receives bridge failures, e.g. to switch to a degraded editor
pub trait FallbackHandler {
    fn on_failure(&mut self, error: &PlatformAdapterError);
}

impl<F: FnMut(&PlatformAdapterError)> FallbackHandler for F {
    fn on_failure(&mut self, error: &PlatformAdapterError) {
        self(error)
    }
}

/// Fallback that does nothing beyond the bridge's own error log
pub fn no_fallback(_: &PlatformAdapterError) {}

/// Bridge selected at construction, with failure reporting
pub struct CompatibilityBridge<P, F = fn(&PlatformAdapterError)> {
    platform: P,
    bridge: Result<Box<dyn ScriptBridge>, PlatformAdapterError>,
    fallback: F,
}

impl<P: PlatformInternals, F: FallbackHandler> CompatibilityBridge<P, F> {
    pub fn new(mut platform: P, mut fallback: F) -> Self {
        let caps = Capabilities::probe(&mut platform);
        let bridge = select_bridge(&caps);
        if let Err(e) = &bridge {
            error!(error = %e, "script bridge unavailable");
            fallback.on_failure(e);
        }
        Self {
            platform,
            bridge,
            fallback,
        }
    }

    /// Generation of the selected bridge, `None` when selection failed
    pub fn generation(&self) -> Option<Generation> {
        self.bridge.as_ref().ok().map(|b| b.generation())
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn execute_script(&mut self, source: &str) -> Result<(), PlatformAdapterError> {
        let result = match &self.bridge {
            Ok(bridge) => bridge.execute_script(&mut self.platform, source),
            Err(e) => Err(e.clone()),
        };
        self.report(result)
    }

    pub fn load_content(&mut self, content: &BaseUrlData) -> Result<(), PlatformAdapterError> {
        let result = match &self.bridge {
            Ok(bridge) => bridge.load_content(&mut self.platform, content),
            Err(e) => Err(e.clone()),
        };
        self.report(result)
    }

    fn report(&mut self, result: Result<(), PlatformAdapterError>) -> Result<(), PlatformAdapterError> {
        if let Err(e) = &result {
            error!(error = %e, "script bridge call failed");
            self.fallback.on_failure(e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeCore {
        messages: Vec<(u32, Payload)>,
        reject: bool,
    }

    impl RenderCore for FakeCore {
        fn post_message(&mut self, code: u32, payload: Payload) -> Result<(), PlatformAdapterError> {
            if self.reject {
                return Err(PlatformAdapterError::Rejected {
                    code,
                    reason: "queue closed".to_string(),
                });
            }
            self.messages.push((code, payload));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeHistory {
        switches: usize,
    }

    impl DrawHistory for FakeHistory {
        fn switch_out_draw_history(&mut self) -> Result<(), PlatformAdapterError> {
            self.switches += 1;
            Ok(())
        }
    }

    struct FakePlatform {
        api_level: u32,
        core: Option<FakeCore>,
        view: Option<FakeHistory>,
        provider: Option<FakeHistory>,
    }

    impl FakePlatform {
        fn legacy() -> Self {
            Self {
                api_level: 15,
                core: Some(FakeCore::default()),
                view: Some(FakeHistory::default()),
                provider: None,
            }
        }

        fn provider() -> Self {
            Self {
                api_level: 18,
                core: Some(FakeCore::default()),
                view: None,
                provider: Some(FakeHistory::default()),
            }
        }
    }

    impl PlatformInternals for FakePlatform {
        fn api_level(&self) -> u32 {
            self.api_level
        }

        fn render_core(&mut self) -> Option<&mut dyn RenderCore> {
            self.core.as_mut().map(|c| c as &mut dyn RenderCore)
        }

        fn view_history(&mut self) -> Option<&mut dyn DrawHistory> {
            self.view.as_mut().map(|h| h as &mut dyn DrawHistory)
        }

        fn provider_history(&mut self) -> Option<&mut dyn DrawHistory> {
            self.provider.as_mut().map(|h| h as &mut dyn DrawHistory)
        }
    }

    fn content() -> BaseUrlData {
        BaseUrlData {
            base_url: "file:///android_asset/".to_string(),
            data: "<p>hi</p>".to_string(),
            mime_type: "text/html".to_string(),
            encoding: "utf-8".to_string(),
            history_url: String::new(),
        }
    }

    #[test]
    fn test_probe_selects_generation() {
        let caps = Capabilities::probe(&mut FakePlatform::legacy());
        assert_eq!(caps.generation(), Some(Generation::Legacy));
        assert_eq!(select_bridge(&caps).unwrap().generation(), Generation::Legacy);

        let caps = Capabilities::probe(&mut FakePlatform::provider());
        assert!(caps.provider_history && !caps.view_history);
        assert_eq!(select_bridge(&caps).unwrap().generation(), Generation::Provider);
    }

    #[test]
    fn test_unsupported_api_level() {
        let mut platform = FakePlatform::provider();
        platform.api_level = 21;
        let caps = Capabilities::probe(&mut platform);
        assert_eq!(select_bridge(&caps).err(), Some(PlatformAdapterError::Unsupported(21)));
    }

    #[test]
    fn test_execute_script_posts_message() {
        let mut bridge = CompatibilityBridge::new(FakePlatform::legacy(), no_fallback);
        bridge.execute_script("ZSSEditor.init();").unwrap();

        let core = bridge.platform().core.as_ref().unwrap();
        assert_eq!(
            core.messages,
            vec![(EXECUTE_SCRIPT, Payload::Script("ZSSEditor.init();".to_string()))]
        );
    }

    #[test]
    fn test_load_content_switches_history_first() {
        let mut bridge = CompatibilityBridge::new(FakePlatform::provider(), no_fallback);
        assert_eq!(bridge.generation(), Some(Generation::Provider));
        bridge.load_content(&content()).unwrap();

        let platform = bridge.platform();
        assert_eq!(platform.provider.as_ref().unwrap().switches, 1);
        assert_eq!(
            platform.core.as_ref().unwrap().messages,
            vec![(LOAD_DATA, Payload::Content(content()))]
        );
    }

    #[test]
    fn test_missing_internal_reaches_fallback() {
        let mut failures = Vec::new();
        {
            let mut platform = FakePlatform::legacy();
            platform.view = None;
            let mut bridge = CompatibilityBridge::new(platform, |e: &PlatformAdapterError| {
                failures.push(e.clone())
            });
            assert_eq!(bridge.generation(), None);
            assert!(bridge.execute_script("x()").is_err());
        }

        let missing = PlatformAdapterError::MissingInternal("view draw history");
        assert_eq!(failures, vec![missing.clone(), missing]);
    }

    #[test]
    fn test_rejected_message_reaches_fallback() {
        let mut failures = 0;
        {
            let mut platform = FakePlatform::legacy();
            if let Some(core) = platform.core.as_mut() {
                core.reject = true;
            }
            let mut bridge =
                CompatibilityBridge::new(platform, |_: &PlatformAdapterError| failures += 1);
            let err = bridge.execute_script("x()").unwrap_err();
            assert!(matches!(err, PlatformAdapterError::Rejected { code: EXECUTE_SCRIPT, .. }));
        }
        assert_eq!(failures, 1);
    }
}
