// ============================================================================
// SDK LOADER - Language-keyed registry for the Naver Maps SDK
// ============================================================================
// The SDK is a single browser global pinned to one language. The registry
// remembers which language is loaded (or loading) so repeated requests skip
// the network, and a request for another language swaps the script.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use url::Url;

use crate::context::Language;
use crate::maps::traits::{ScriptHost, SdkError};
use crate::utils::constants::NAVER_SDK_BASE_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SdkLoadState {
    #[default]
    NotLoaded,
    Loading,
    Ready,
    Failed,
}

type Waiter = Box<dyn FnOnce(SdkLoadState)>;

#[derive(Default)]
struct SdkRegistry {
    state: SdkLoadState,
    language: Option<Language>,
    /// Bumped on every injection and reset; late script callbacks compare against it
    generation: u64,
    waiters: Vec<Waiter>,
}

/// Handle on an SDK registry. Clones share the same registry.
#[derive(Clone, Default)]
pub struct SdkLoader {
    registry: Rc<RefCell<SdkRegistry>>,
}

thread_local! {
    static GLOBAL_SDK: SdkLoader = SdkLoader::new();
}

/// `maps.js` URL for a client id and language
pub fn sdk_script_url(client_id: &str, language: Language) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        NAVER_SDK_BASE_URL,
        &[("ncpKeyId", client_id), ("language", language.sdk_tag())],
    )
}

impl SdkLoader {
    /// Isolated registry (one per page is the norm, see [`SdkLoader::global`])
    pub fn new() -> Self {
        Self::default()
    }

    /// The page-wide registry matching the single SDK global
    pub fn global() -> Self {
        GLOBAL_SDK.with(|loader| loader.clone())
    }

    pub fn state(&self) -> SdkLoadState {
        self.registry.borrow().state
    }

    pub fn language(&self) -> Option<Language> {
        self.registry.borrow().language
    }

    pub fn is_ready_for(&self, host: &dyn ScriptHost, language: Language) -> bool {
        let registry = self.registry.borrow();
        registry.state == SdkLoadState::Ready
            && registry.language == Some(language)
            && host.sdk_present()
    }

    /// Make sure the SDK for `language` is loaded, then call `on_settled` with
    /// `Ready` or `Failed`. Runs synchronously when it is already loaded.
    pub fn ensure<F>(&self, host: &Rc<dyn ScriptHost>, src: &str, language: Language, on_settled: F)
    where
        F: FnOnce(SdkLoadState) + 'static,
    {
        if self.is_ready_for(host.as_ref(), language) {
            log::debug!("🗺️ SDK ({}) already loaded, skipping injection", language.sdk_tag());
            on_settled(SdkLoadState::Ready);
            return;
        }

        let (generation, superseded) = {
            let mut registry = self.registry.borrow_mut();

            if registry.state == SdkLoadState::Loading && registry.language == Some(language) {
                log::debug!("🗺️ SDK ({}) already loading, queued", language.sdk_tag());
                registry.waiters.push(Box::new(on_settled));
                return;
            }

            let superseded = std::mem::take(&mut registry.waiters);
            registry.generation += 1;
            registry.state = SdkLoadState::Loading;
            registry.language = Some(language);
            registry.waiters.push(Box::new(on_settled));
            (registry.generation, superseded)
        };

        if !superseded.is_empty() {
            let reason = SdkError::Superseded(language.sdk_tag().to_string());
            log::warn!("⚠️ {} pending SDK request(s): {}", superseded.len(), reason);
        }
        for waiter in superseded {
            waiter(SdkLoadState::Failed);
        }

        host.remove_loader_scripts();
        host.clear_sdk_global();

        log::info!("📥 Loading map SDK ({})", language.sdk_tag());
        let registry = Rc::downgrade(&self.registry);
        host.inject_script(
            src,
            Box::new(move |result| {
                let Some(registry) = registry.upgrade() else {
                    return;
                };

                let (state, waiters) = {
                    let mut registry = registry.borrow_mut();
                    if registry.generation != generation {
                        log::debug!("🗺️ Ignoring result of superseded SDK load #{}", generation);
                        return;
                    }

                    registry.state = match result {
                        Ok(()) => {
                            log::info!("✅ Map SDK ready");
                            SdkLoadState::Ready
                        }
                        Err(e) => {
                            log::error!("❌ {}", e);
                            SdkLoadState::Failed
                        }
                    };
                    (registry.state, std::mem::take(&mut registry.waiters))
                };

                for waiter in waiters {
                    waiter(state);
                }
            }),
        );
    }

    /// Forget the loaded SDK and remove it from the page
    pub fn reset(&self, host: &dyn ScriptHost) {
        let waiters = {
            let mut registry = self.registry.borrow_mut();
            registry.generation += 1;
            registry.state = SdkLoadState::NotLoaded;
            registry.language = None;
            std::mem::take(&mut registry.waiters)
        };

        for waiter in waiters {
            waiter(SdkLoadState::Failed);
        }

        host.remove_loader_scripts();
        host.clear_sdk_global();
        log::info!("🧹 Map SDK registry reset");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::maps::fake::FakeScriptHost;

    fn host() -> (Rc<FakeScriptHost>, Rc<dyn ScriptHost>) {
        let fake = Rc::new(FakeScriptHost::default());
        let host: Rc<dyn ScriptHost> = fake.clone();
        (fake, host)
    }

    fn recorder() -> (Rc<RefCell<Vec<SdkLoadState>>>, impl Fn() -> Box<dyn FnOnce(SdkLoadState)>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let make = move || {
            let sink = sink.clone();
            Box::new(move |state| sink.borrow_mut().push(state)) as Box<dyn FnOnce(SdkLoadState)>
        };
        (seen, make)
    }

    #[test]
    fn builds_language_pinned_url() {
        let url = sdk_script_url("abc123", Language::English).unwrap();
        assert_eq!(
            url.as_str(),
            "https://oapi.map.naver.com/openapi/v3/maps.js?ncpKeyId=abc123&language=en"
        );
    }

    #[test]
    fn same_language_injects_once() {
        let (fake, host) = host();
        let loader = SdkLoader::new();
        let (seen, cb) = recorder();

        loader.ensure(&host, "sdk-ko", Language::Korean, cb());
        loader.ensure(&host, "sdk-ko", Language::Korean, cb());
        assert_eq!(loader.state(), SdkLoadState::Loading);
        assert_eq!(fake.injections(), 1);

        fake.finish_load(Ok(()));
        assert_eq!(*seen.borrow(), vec![SdkLoadState::Ready, SdkLoadState::Ready]);

        // Already loaded: answered synchronously, still one injection
        loader.ensure(&host, "sdk-ko", Language::Korean, cb());
        assert_eq!(fake.injections(), 1);
        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(loader.language(), Some(Language::Korean));
    }

    #[test]
    fn other_language_reinjects_and_clears_global() {
        let (fake, host) = host();
        let loader = SdkLoader::new();
        let (seen, cb) = recorder();

        loader.ensure(&host, "sdk-ko", Language::Korean, cb());
        fake.finish_load(Ok(()));
        assert!(fake.sdk_present());

        loader.ensure(&host, "sdk-en", Language::English, cb());
        assert_eq!(fake.injections(), 2);
        assert_eq!(fake.clears(), 2);
        assert!(!fake.sdk_present());
        assert!(!loader.is_ready_for(host.as_ref(), Language::Korean));
        assert_eq!(fake.injected_sources().last().map(String::as_str), Some("sdk-en"));

        fake.finish_load(Ok(()));
        assert!(loader.is_ready_for(host.as_ref(), Language::English));
        assert_eq!(*seen.borrow(), vec![SdkLoadState::Ready, SdkLoadState::Ready]);
    }

    #[test]
    fn superseded_load_is_ignored() {
        let (fake, host) = host();
        let loader = SdkLoader::new();
        let (seen, cb) = recorder();

        loader.ensure(&host, "sdk-ko", Language::Korean, cb());
        loader.ensure(&host, "sdk-en", Language::English, cb());
        // The Korean waiter gives up as soon as English is requested
        assert_eq!(*seen.borrow(), vec![SdkLoadState::Failed]);

        // Korean script finishing late must not flip the registry
        fake.finish_oldest(Ok(()));
        assert_eq!(loader.state(), SdkLoadState::Loading);

        fake.finish_load(Ok(()));
        assert_eq!(loader.state(), SdkLoadState::Ready);
        assert_eq!(loader.language(), Some(Language::English));
        assert_eq!(*seen.borrow(), vec![SdkLoadState::Failed, SdkLoadState::Ready]);
        assert_eq!(
            SdkError::Superseded(Language::English.sdk_tag().to_string()).to_string(),
            "map SDK request superseded by a load for 'en'"
        );
    }

    #[test]
    fn failure_is_reported_and_retried_on_next_request() {
        let (fake, host) = host();
        let loader = SdkLoader::new();
        let (seen, cb) = recorder();

        loader.ensure(&host, "sdk-ko", Language::Korean, cb());
        fake.finish_load(Err(crate::maps::SdkError::ScriptLoad("404".into())));
        assert_eq!(loader.state(), SdkLoadState::Failed);
        assert_eq!(*seen.borrow(), vec![SdkLoadState::Failed]);

        loader.ensure(&host, "sdk-ko", Language::Korean, cb());
        assert_eq!(fake.injections(), 2);
    }

    #[test]
    fn reset_invalidates_loaded_sdk() {
        let (fake, host) = host();
        let loader = SdkLoader::new();
        let (_seen, cb) = recorder();

        loader.ensure(&host, "sdk-ko", Language::Korean, cb());
        fake.finish_load(Ok(()));
        loader.reset(host.as_ref());

        assert_eq!(loader.state(), SdkLoadState::NotLoaded);
        assert_eq!(loader.language(), None);
        assert!(!fake.sdk_present());

        loader.ensure(&host, "sdk-ko", Language::Korean, cb());
        assert_eq!(fake.injections(), 2);
    }

    #[test]
    fn global_handles_share_one_registry() {
        let (fake, host) = host();
        let (_seen, cb) = recorder();

        SdkLoader::global().ensure(&host, "sdk-ko", Language::Korean, cb());
        assert_eq!(SdkLoader::global().state(), SdkLoadState::Loading);
        fake.finish_load(Ok(()));
        assert!(SdkLoader::global().is_ready_for(host.as_ref(), Language::Korean));

        SdkLoader::global().reset(host.as_ref());
    }
}
