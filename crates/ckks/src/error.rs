use thiserror::Error;

/// Top-level error type returned across the public API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("parameter error: {0}")]
    Parameter(#[from] ParameterError),

    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("key error: {0}")]
    Key(#[from] KeyError),

    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    #[error("sampling error: {0}")]
    Sampling(#[from] SamplingError),

    #[error(transparent)]
    Math(#[from] ckks_math::MathError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("missing required parameter: {0}")]
    MissingField(String),

    #[error("polynomial degree {0} is not a power of two")]
    DegreeNotPowerOfTwo(usize),

    #[error("ciphertext modulus must be smaller than the big modulus")]
    CiphertextModulusTooLarge,

    #[error("scaling factor must be greater than one")]
    ScalingFactorTooSmall,

    #[error("requested hamming weight {requested} exceeds the ring degree {degree}")]
    HammingWeightTooLarge { requested: usize, degree: usize },

    #[error("prime size must be at least {minimum} bits to exceed the scaling factor")]
    PrimeSizeTooSmall { minimum: usize },

    #[error("taylor_iterations must be at least 1")]
    TaylorIterationsTooSmall,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("expected at most {max} values, found {found}")]
    TooManyValues { max: usize, found: usize },

    #[error("expected {expected} coefficients, found {found}")]
    CoefficientCountMismatch { expected: usize, found: usize },

    #[error("matrix dimension {0} does not match the number of slots {1}")]
    MatrixDimensionMismatch(usize, usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("ciphertext and key were generated under incompatible parameters")]
    IncompatibleParameters,

    #[error("no rotation key registered for step {0}")]
    MissingRotationKey(i64),

    #[error("relinearization key required for this operation but none was supplied")]
    MissingRelinearizationKey,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("ciphertexts are at different levels ({0} vs {1}) and must be aligned before combining")]
    LevelMismatch(usize, usize),

    #[error("ciphertext has already been rescaled past its last modulus limb")]
    ModulusChainExhausted,

    #[error("cannot relinearize a ciphertext with {0} components, expected 3")]
    UnexpectedCiphertextDegree(usize),

    #[error("plaintext and ciphertext scaling factors differ ({0} vs {1})")]
    ScaleMismatch(String, String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SamplingError {
    #[error("cannot sample a hamming-weight vector of weight {weight} from {degree} coefficients")]
    HammingWeightExceedsDegree { weight: usize, degree: usize },
}

impl From<derive_builder::UninitializedFieldError> for ParameterError {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        ParameterError::MissingField(e.field_name().to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
