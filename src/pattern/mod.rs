mod error;
mod lexer;
mod segment;
mod synth;

pub use error::{PatternError, PatternResult};
pub use lexer::parse_segment;
pub use segment::{
    Capture, CaptureKind, EXT_PARAM, PATH_PARAM, ParamFragment, ParamNames, SPLAT_PARAM,
    SegmentPart, SegmentSpec,
};
pub use synth::{LeafRegex, requires_regex};
