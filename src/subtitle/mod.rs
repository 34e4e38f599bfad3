/*!
 * Subtitle synthesis.
 *
 * - `model`: word tokens, phrases and the run style
 * - `segmenter`: groups word tokens into phrases
 * - `timing`: on-screen duration policy
 * - `layout`: wraps phrase text over display lines
 * - `renderer`: serializes phrases into an ASS script
 */

pub mod layout;
pub mod model;
pub mod renderer;
pub mod segmenter;
pub mod timing;

pub use self::layout::{TextLayoutFormatter, LINE_BREAK};
pub use self::model::{
    AssColor, FontSize, Position, RgbaColor, SubtitlePhrase, SubtitleStyle, WordToken,
};
pub use self::renderer::SubtitleTrackRenderer;
pub use self::segmenter::PhraseSegmenter;
pub use self::timing::TimingNormalizer;
