//! Leveled assertions for internal invariants.
//!
//! Cheap checks run at [`KAIROS_ASSERT_SIMPLE`]; the more expensive ones (which usually recompute
//! an aggregate by brute force) only run when the level is raised. Enabling the `debug-checks`
//! feature raises the level to [`KAIROS_ASSERT_EXTREME`].

#[cfg(not(feature = "debug-checks"))]
pub(crate) const KAIROS_ASSERT_LEVEL_DEFINITION: u8 = KAIROS_ASSERT_SIMPLE;
#[cfg(feature = "debug-checks")]
pub(crate) const KAIROS_ASSERT_LEVEL_DEFINITION: u8 = KAIROS_ASSERT_EXTREME;

pub(crate) const KAIROS_ASSERT_SIMPLE: u8 = 1;
pub(crate) const KAIROS_ASSERT_MODERATE: u8 = 2;
pub(crate) const KAIROS_ASSERT_ADVANCED: u8 = 3;
pub(crate) const KAIROS_ASSERT_EXTREME: u8 = 4;

macro_rules! print_kairos_assert_warning_message {
    () => {
        if $crate::kairos_asserts::KAIROS_ASSERT_LEVEL_DEFINITION
            >= $crate::kairos_asserts::KAIROS_ASSERT_MODERATE
        {
            log::warn!(
                "Potential performance degradation: the Kairos assert level is set to {}, meaning many debug asserts are active.",
                $crate::kairos_asserts::KAIROS_ASSERT_LEVEL_DEFINITION
            );
        };
    };
}

macro_rules! kairos_assert_simple {
    ($($arg:tt)*) => {
        if $crate::kairos_asserts::KAIROS_ASSERT_LEVEL_DEFINITION >= $crate::kairos_asserts::KAIROS_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

macro_rules! kairos_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::kairos_asserts::KAIROS_ASSERT_LEVEL_DEFINITION >= $crate::kairos_asserts::KAIROS_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

macro_rules! kairos_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::kairos_asserts::KAIROS_ASSERT_LEVEL_DEFINITION >= $crate::kairos_asserts::KAIROS_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

macro_rules! kairos_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::kairos_asserts::KAIROS_ASSERT_LEVEL_DEFINITION >= $crate::kairos_asserts::KAIROS_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

macro_rules! kairos_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::kairos_asserts::KAIROS_ASSERT_LEVEL_DEFINITION >= $crate::kairos_asserts::KAIROS_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}

pub(crate) use kairos_assert_advanced;
pub(crate) use kairos_assert_eq_simple;
pub(crate) use kairos_assert_extreme;
pub(crate) use kairos_assert_moderate;
pub(crate) use kairos_assert_simple;
pub(crate) use print_kairos_assert_warning_message;
