//! SQLite-backed inventory fixtures shared by store and handler tests.

use crate::cabling::CableWriter;
use crate::db::Store;
use crate::models::*;

pub struct Fixture {
    pub store: Store,
    pub site: i64,
    pub racks: [i64; 3],
    pub x: i64,
    pub y: i64,
    pub spk_fronts: Vec<i64>,
    pub ss_fronts: Vec<i64>,
}

pub fn scope() -> crate::cabling::PanelScope {
    crate::cabling::PanelScope {
        panel_role: "modular-panels".into(),
        trunk_tag: "modular-trunk".into(),
        front_port_type: Some("lc".into()),
    }
}

pub async fn panel(store: &Store, site: i64, rack: i64, name: &str) -> i64 {
    store
        .create_device(&CreateDeviceRequest {
            site_id: site,
            rack_id: Some(rack),
            name: name.into(),
            role: "modular-panels".into(),
        })
        .await
        .unwrap()
        .id
}

pub async fn device(store: &Store, site: i64, rack: i64, name: &str) -> i64 {
    store
        .create_device(&CreateDeviceRequest {
            site_id: site,
            rack_id: Some(rack),
            name: name.into(),
            role: "cpe-router".into(),
        })
        .await
        .unwrap()
        .id
}

pub async fn port(store: &Store, device: i64, name: &str, kind: PortKind, rear: Option<(i64, i32)>) -> i64 {
    store
        .create_port(&CreatePortRequest {
            device_id: device,
            name: name.into(),
            kind,
            port_type: if kind == PortKind::Front { "lc".into() } else { "mpo-12".into() },
            positions: if kind == PortKind::Rear { 12 } else { 1 },
            rear_port_id: rear.map(|(id, _)| id),
            rear_port_position: rear.map(|(_, pos)| pos),
        })
        .await
        .unwrap()
        .id
}

pub async fn site(store: &Store, name: &str) -> i64 {
    store
        .create_site(&CreateSiteRequest { name: name.into(), slug: name.to_lowercase() })
        .await
        .unwrap()
        .id
}

pub async fn rack(store: &Store, site: i64, name: &str, is_hub: bool) -> i64 {
    store
        .create_rack(&CreateRackRequest { site_id: site, name: name.into(), is_hub })
        .await
        .unwrap()
        .id
}

/// Trunk two new panels, each given as (site, rack, name), and return their
/// front ports at positions 1..=2
pub async fn trunked_panels(store: &Store, a: (i64, i64, &str), b: (i64, i64, &str)) -> (Vec<i64>, Vec<i64>) {
    let pa = panel(store, a.0, a.1, a.2).await;
    let pb = panel(store, b.0, b.1, b.2).await;
    let ra = port(store, pa, "RP1", PortKind::Rear, None).await;
    let rb = port(store, pb, "RP1", PortKind::Rear, None).await;
    let mut fa = Vec::new();
    let mut fb = Vec::new();
    for pos in 1..=2 {
        fa.push(port(store, pa, &format!("FP{}", pos), PortKind::Front, Some((ra, pos))).await);
        fb.push(port(store, pb, &format!("FP{}", pos), PortKind::Front, Some((rb, pos))).await);
    }
    store
        .create_cable(&NewCable {
            a_port_id: ra,
            b_port_id: rb,
            label: format!("COM--{}--{}--C0001", a.2, b.2),
            status: cable_status::CONNECTED.into(),
            cable_type: cable_type::SMF_OS2.into(),
            length: None,
            tags: vec!["modular-trunk".into()],
        })
        .await
        .unwrap();
    (fa, fb)
}

pub async fn hub_fixture() -> Fixture {
    let store = Store::in_memory().await.unwrap();
    let site = site(&store, "LAX1").await;
    let mut racks = Vec::new();
    for (name, is_hub) in [("R101", false), ("R102", false), ("R200", true)] {
        racks.push(rack(&store, site, name, is_hub).await);
    }
    let (r1, r2, hub) = (racks[0], racks[1], racks[2]);

    let mut endpoints = Vec::new();
    for (name, rack) in [("rtr-1", r1), ("rtr-2", r2)] {
        let dev = device(&store, site, rack, name).await;
        endpoints.push(port(&store, dev, "Ethernet1", PortKind::Interface, None).await);
    }

    let (spk1, _) = trunked_panels(&store, (site, r1, "SPK-R101-U40"), (site, hub, "HUB-R200-U01")).await;
    let (ss, _) = trunked_panels(&store, (site, r2, "SPK-R102-U40"), (site, hub, "HUB-R200-U02")).await;

    Fixture {
        store,
        site,
        racks: [r1, r2, hub],
        x: endpoints[0],
        y: endpoints[1],
        spk_fronts: spk1,
        ss_fronts: ss,
    }
}
