//! CLI enum types for preprocessing mode selection.

use clap::ValueEnum;

use crate::preprocess::Preprocessing;

/// Preprocessing mode as selected on the command line.
///
/// Carries an explicit `None` value so the literal `None` accepted by the
/// original interface keeps working; anything outside this closed set is
/// rejected at argument-parsing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PreprocessingArg {
    #[default]
    #[value(name = "None")]
    None,
    #[value(name = "grayscale")]
    Grayscale,
    #[value(name = "grayscale_blur3x3")]
    GrayscaleBlur3x3,
    #[value(name = "laplacian")]
    Laplacian,
}

impl From<PreprocessingArg> for Option<Preprocessing> {
    fn from(p: PreprocessingArg) -> Self {
        match p {
            PreprocessingArg::None => None,
            PreprocessingArg::Grayscale => Some(Preprocessing::Grayscale),
            PreprocessingArg::GrayscaleBlur3x3 => Some(Preprocessing::GrayscaleBlur3x3),
            PreprocessingArg::Laplacian => Some(Preprocessing::Laplacian),
        }
    }
}

impl PreprocessingArg {
    /// Parse a mode name, case-insensitively. Shared with the config-file
    /// loader so both inputs fail fast on unknown names.
    pub fn parse_name(s: &str) -> Result<Self, String> {
        <Self as ValueEnum>::from_str(s, true)
    }
}
