use std::{
    io,
    net::{IpAddr, Ipv4Addr, ToSocketAddrs},
};

/// Resolves a hostname to an IPv4 address.
///
/// Blocking by design: the generator resolves its host component once, before
/// any UID is produced.
pub trait Resolver {
    /// Returns the first usable IPv4 address for `host`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or yields no usable IPv4 address.
    fn resolve_ipv4(&self, host: &str) -> io::Result<Ipv4Addr>;
}

impl<R> Resolver for &R
where
    R: Resolver + ?Sized,
{
    fn resolve_ipv4(&self, host: &str) -> io::Result<Ipv4Addr> {
        (**self).resolve_ipv4(host)
    }
}

/// [`Resolver`] backed by the platform resolver (`getaddrinfo` on unix).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self)))]
    fn resolve_ipv4(&self, host: &str) -> io::Result<Ipv4Addr> {
        (host, 0)
            .to_socket_addrs()?
            .find_map(|addr| match addr.ip() {
                IpAddr::V4(ip) if !ip.is_unspecified() && !ip.is_multicast() => Some(ip),
                _ => None,
            })
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no IPv4 address found for host {host}"),
                )
            })
    }
}
