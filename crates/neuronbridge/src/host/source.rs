use std::net::Ipv4Addr;

use super::{Resolver, SystemResolver};

/// Hostname resolved when the local hostname cannot be.
pub const LOOPBACK_HOSTNAME: &str = "localhost";

/// Supplies the 8-bit host component embedded in every JACS UID.
pub trait HostSource {
    /// Returns the host component. Must be stable for the lifetime of the
    /// source.
    fn host_component(&self) -> u8;
}

impl<H> HostSource for &H
where
    H: HostSource + ?Sized,
{
    fn host_component(&self) -> u8 {
        (**self).host_component()
    }
}

/// A host component chosen explicitly, e.g. from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedHost(pub u8);

impl HostSource for FixedHost {
    fn host_component(&self) -> u8 {
        self.0
    }
}

/// Where a [`ResolvedHost`] got its address from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostOrigin {
    /// The machine's own hostname resolved.
    Hostname,
    /// The hostname failed; [`LOOPBACK_HOSTNAME`] resolved instead.
    Loopback,
    /// Neither name resolved; [`Ipv4Addr::LOCALHOST`] was assumed.
    Fallback,
}

/// A host component derived from the last octet of the host's IPv4 address.
///
/// Resolution happens once, in the constructor, and the result is cached, so
/// the component is stable for the value's lifetime. Failure is never fatal:
/// the hostname falls back to [`LOOPBACK_HOSTNAME`], and if that also fails to
/// `127.0.0.1`.
///
/// # Example
///
/// ```
/// use neuronbridge::host::{HostOrigin, HostSource, ResolvedHost, Resolver};
/// use std::{io, net::Ipv4Addr};
///
/// struct Static;
/// impl Resolver for Static {
///     fn resolve_ipv4(&self, _host: &str) -> io::Result<Ipv4Addr> {
///         Ok(Ipv4Addr::new(10, 40, 2, 117))
///     }
/// }
///
/// let host = ResolvedHost::resolve_with(&Static, "render-node-7");
/// assert_eq!(host.host_component(), 117);
/// assert_eq!(host.origin(), HostOrigin::Hostname);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedHost {
    address: Ipv4Addr,
    origin: HostOrigin,
}

impl ResolvedHost {
    /// Resolves the local hostname with the platform resolver.
    #[must_use]
    pub fn resolve() -> Self {
        let hostname = gethostname::gethostname();
        Self::resolve_with(&SystemResolver, &hostname.to_string_lossy())
    }

    /// Resolves `hostname` with `resolver`, falling back to the loopback name
    /// and then the loopback address.
    #[must_use]
    pub fn resolve_with<R: Resolver>(resolver: &R, hostname: &str) -> Self {
        match resolver.resolve_ipv4(hostname) {
            Ok(address) => {
                return Self {
                    address,
                    origin: HostOrigin::Hostname,
                };
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(hostname, error = %_e, "hostname did not resolve, trying loopback");
            }
        }

        match resolver.resolve_ipv4(LOOPBACK_HOSTNAME) {
            Ok(address) => Self {
                address,
                origin: HostOrigin::Loopback,
            },
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(hostname, error = %_e, "loopback did not resolve, assuming 127.0.0.1");
                Self {
                    address: Ipv4Addr::LOCALHOST,
                    origin: HostOrigin::Fallback,
                }
            }
        }
    }

    #[must_use]
    pub const fn address(&self) -> Ipv4Addr {
        self.address
    }

    #[must_use]
    pub const fn origin(&self) -> HostOrigin {
        self.origin
    }
}

impl HostSource for ResolvedHost {
    fn host_component(&self) -> u8 {
        self.address.octets()[3]
    }
}
