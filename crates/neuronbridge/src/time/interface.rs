use core::time::Duration;
use std::{rc::Rc, sync::Arc};

/// JACS epoch: Wednesday, March 17, 1999 19:46:40 UTC
///
/// Every JACS UID timestamp is an offset from this point.
pub const JACS_EPOCH: Duration = Duration::from_millis(921_700_000_000);

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the system clock or a mocked time
/// source in tests.
///
/// The timestamp type `T` is generic, and the unit is expected to be
/// **milliseconds** relative to a configurable origin.
///
/// # Example
///
/// ```
/// use neuronbridge::time::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<u64> for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in milliseconds since the configured epoch.
    fn current_millis(&self) -> T;
}

impl<T, S> TimeSource<T> for &S
where
    S: TimeSource<T> + ?Sized,
{
    fn current_millis(&self) -> T {
        (**self).current_millis()
    }
}

impl<T, S> TimeSource<T> for Rc<S>
where
    S: TimeSource<T> + ?Sized,
{
    fn current_millis(&self) -> T {
        (**self).current_millis()
    }
}

impl<T, S> TimeSource<T> for Arc<S>
where
    S: TimeSource<T> + ?Sized,
{
    fn current_millis(&self) -> T {
        (**self).current_millis()
    }
}
