/// Machine Translation Module
///
/// Everything needed to reach an external translation service from the
/// phrase navigator and the controller.
///
/// # Overview
///
/// 1. **MT Trait** - `MachineTranslator`, the single `translate` seam
/// 2. **Providers** - Google Cloud v2 (keyed), the public web endpoint (keyless), and a mock
/// 3. **Deadline** - `TimeoutTranslator` bounds any provider call
///
/// # Example
///
/// ```ignore
/// use g2e_translator::mt::{GoogleWebProvider, MachineTranslator, TimeoutTranslator};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = TimeoutTranslator::new(GoogleWebProvider::new()?, Duration::from_secs(10));
///     let translated = provider.translate("Wie spät ist es?", "de", "en").await?;
///     println!("{}", translated);
///     Ok(())
/// }
/// ```
pub mod error;
pub mod google_translate;
pub mod google_web;
pub mod mock;
#[cfg(test)]
mod test_server;
pub mod timeout;
pub mod translator;

pub use error::{MtError, MtResult};
pub use google_translate::GoogleTranslateProvider;
pub use google_web::GoogleWebProvider;
pub use mock::{MockMode, MockTranslator, RecordedCall};
pub use timeout::TimeoutTranslator;
pub use translator::{MachineTranslator, normalize_locale, validate_locale};
