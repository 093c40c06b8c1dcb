use gir_core::IrError;
use thiserror::Error;

/// Known gaps in lowering. These are not bugs: each needs its own lowering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Generics,
    NestedModule,
    Postulate,
    Record,
    DataConstructor,
    Projection,
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self {
            Feature::Generics => "generic definitions",
            Feature::NestedModule => "nested modules",
            Feature::Postulate => "postulates",
            Feature::Record => "records",
            Feature::DataConstructor => "data constructor definitions",
            Feature::Projection => "record projections",
        };
        write!(f, "{}", what)
    }
}

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Unsupported: {feature} are not lowered yet (`{name}`)")]
    Unsupported { feature: Feature, name: String },

    #[error(transparent)]
    Ir(#[from] IrError),
}

impl GenError {
    pub fn unsupported(feature: Feature, name: impl Into<String>) -> Self {
        GenError::Unsupported {
            feature,
            name: name.into(),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, GenError::Unsupported { .. })
    }

    pub fn feature(&self) -> Option<Feature> {
        match self {
            GenError::Unsupported { feature, .. } => Some(*feature),
            GenError::Ir(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;

/// Aborts on a broken pipeline invariant. Such input never comes out of a correct elaborator, so
/// there is nothing to report to the user.
macro_rules! invariant_violation {
    ($($arg:tt)*) => {
        panic!("internal invariant violated: {}", format_args!($($arg)*))
    };
}

pub(crate) use invariant_violation;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ir_errors_keep_their_message() {
        let err = GenError::from(IrError::DuplicateContinuation("k".to_string()));
        assert_eq!(err.to_string(), "Continuation k already exists");
        assert!(!err.is_unsupported());
    }

    #[test]
    fn test_unsupported_names_the_declaration() {
        let err = GenError::unsupported(Feature::Record, "Pair");
        assert_eq!(
            err.to_string(),
            "Unsupported: records are not lowered yet (`Pair`)"
        );
        assert_eq!(err.feature(), Some(Feature::Record));
    }
}
