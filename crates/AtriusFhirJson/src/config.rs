//! Codec options.

/// Nesting limit applied when no other is configured.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// What to do with JSON keys that match no field of the target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFieldPolicy {
    /// Skip the key, logging a warning
    #[default]
    Ignore,
    /// Fail with `CodecError::UnknownField`
    Reject,
}

/// Options for [`Marshaler`](crate::Marshaler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarshalOptions {
    /// Maximum composite nesting, counting extensions
    pub max_depth: usize,
}

impl Default for MarshalOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl MarshalOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options for [`Unmarshaler`](crate::Unmarshaler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmarshalOptions {
    pub unknown_fields: UnknownFieldPolicy,
    /// Maximum object nesting, counting extensions
    pub max_depth: usize,
    /// Compare a resource's `resourceType` with the target type
    pub check_resource_type: bool,
}

impl Default for UnmarshalOptions {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Ignore,
            max_depth: DEFAULT_MAX_DEPTH,
            check_resource_type: true,
        }
    }
}

impl UnmarshalOptions {
    /// Strict decoding: unknown keys are errors.
    pub fn strict() -> Self {
        Self::default().with_unknown_fields(UnknownFieldPolicy::Reject)
    }

    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_check_resource_type(mut self, check: bool) -> Self {
        self.check_resource_type = check;
        self
    }
}
