use std::{cell::RefCell, collections::HashMap, io, net::Ipv4Addr};

use crate::host::{
    FixedHost, HostOrigin, HostSource, LOOPBACK_HOSTNAME, ResolvedHost, Resolver, SystemResolver,
};

#[derive(Default)]
struct MockResolver {
    table: HashMap<&'static str, Ipv4Addr>,
    lookups: RefCell<Vec<String>>,
}

impl MockResolver {
    fn with(mut self, host: &'static str, ip: Ipv4Addr) -> Self {
        self.table.insert(host, ip);
        self
    }
}

impl Resolver for MockResolver {
    fn resolve_ipv4(&self, host: &str) -> io::Result<Ipv4Addr> {
        self.lookups.borrow_mut().push(host.to_owned());
        self.table
            .get(host)
            .copied()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, host.to_owned()))
    }
}

#[test]
fn uses_last_octet_of_hostname_address() {
    let resolver = MockResolver::default().with("nb-worker", Ipv4Addr::new(10, 36, 13, 200));
    let host = ResolvedHost::resolve_with(&resolver, "nb-worker");

    assert_eq!(host.host_component(), 200);
    assert_eq!(host.origin(), HostOrigin::Hostname);
    assert_eq!(*resolver.lookups.borrow(), ["nb-worker"]);
}

#[test]
fn falls_back_to_loopback_name() {
    let resolver = MockResolver::default().with(LOOPBACK_HOSTNAME, Ipv4Addr::new(127, 0, 1, 1));
    let host = ResolvedHost::resolve_with(&resolver, "unknown-host");

    assert_eq!(host.host_component(), 1);
    assert_eq!(host.origin(), HostOrigin::Loopback);
    assert_eq!(*resolver.lookups.borrow(), ["unknown-host", LOOPBACK_HOSTNAME]);
}

#[test]
fn falls_back_to_loopback_address_when_nothing_resolves() {
    let resolver = MockResolver::default();
    let host = ResolvedHost::resolve_with(&resolver, "unknown-host");

    assert_eq!(host.address(), Ipv4Addr::LOCALHOST);
    assert_eq!(host.host_component(), 1);
    assert_eq!(host.origin(), HostOrigin::Fallback);
}

#[test]
fn resolution_is_cached() {
    let resolver = MockResolver::default().with("nb-worker", Ipv4Addr::new(10, 0, 0, 9));
    let host = ResolvedHost::resolve_with(&resolver, "nb-worker");

    for _ in 0..3 {
        assert_eq!(host.host_component(), 9);
    }
    assert_eq!(resolver.lookups.borrow().len(), 1);
}

#[test]
fn fixed_host_returns_its_component() {
    assert_eq!(FixedHost(77).host_component(), 77);
    assert_eq!((&FixedHost(3)).host_component(), 3);
}

#[test]
fn system_resolver_resolves_ip_literals() {
    let ip = SystemResolver.resolve_ipv4("127.0.0.1").unwrap();
    assert_eq!(ip, Ipv4Addr::LOCALHOST);
}

#[test]
fn local_resolution_never_fails() {
    let host = ResolvedHost::resolve();
    assert_eq!(host.host_component(), host.address().octets()[3]);
}
