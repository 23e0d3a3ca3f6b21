use anyhow::Result;
use async_trait::async_trait;

use crate::models::{
    cable_type, Cable, CableAttributes, ConnectionPlan, CreatedCable, NewCable, Port, PortLocation,
};

use super::labels::{cable_log, next_trunk_label, trunk_label};
use super::{CablingError, PanelScope};

/// Write side of the inventory used when materializing cables
#[async_trait]
pub trait CableWriter: Send + Sync {
    /// Create one cable and mark both ports as cabled, atomically.
    /// Fails if either port already has a cable.
    async fn create_cable(&self, req: &NewCable) -> Result<Cable>;

    /// Labels of every cable carrying `tag`
    async fn list_tagged_labels(&self, tag: &str) -> Result<Vec<String>>;

    /// Display names of the site, rack, device and port of `port_id`
    async fn describe_port(&self, port_id: i64) -> Result<PortLocation>;
}

/// CableMaterializer turns plans into cables, in plan order
pub struct CableMaterializer<'a, W: CableWriter + ?Sized> {
    writer: &'a W,
    scope: &'a PanelScope,
}

impl<'a, W: CableWriter + ?Sized> CableMaterializer<'a, W> {
    pub fn new(writer: &'a W, scope: &'a PanelScope) -> Self {
        Self { writer, scope }
    }

    /// Create one cable per plan segment. Cables created before a failing
    /// segment are left in place and reported in the error.
    pub async fn materialize(
        &self,
        plan: &ConnectionPlan,
        attrs: &CableAttributes,
    ) -> Result<Vec<CreatedCable>, CablingError> {
        let mut created: Vec<CreatedCable> = Vec::with_capacity(plan.segments.len());

        for (i, segment) in plan.segments.iter().enumerate() {
            let req = NewCable::between(&segment.a, &segment.b, attrs);
            match self.create(&req).await {
                Ok(cable) => created.push(cable),
                Err(e) if created.is_empty() => return Err(e),
                Err(e) => {
                    let ids: Vec<i64> = created.iter().map(|c| c.cable.id).collect();
                    tracing::warn!(
                        "Cable segment {} of {} failed, cables {:?} remain: {}",
                        i + 1,
                        plan.segments.len(),
                        ids,
                        e
                    );
                    return Err(CablingError::PartialCreation {
                        created: ids,
                        failed_segment: i + 1,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(created)
    }

    /// Single cable between two endpoints in the same rack
    pub async fn create_single(
        &self,
        a: &Port,
        b: &Port,
        attrs: &CableAttributes,
    ) -> Result<CreatedCable, CablingError> {
        self.create(&NewCable::between(a, b, attrs)).await
    }

    /// Modular trunk between two panel rear ports, labelled with the next trunk id
    pub async fn create_trunk(
        &self,
        panel_a: &str,
        rear_a: &Port,
        panel_b: &str,
        rear_b: &Port,
        status: &str,
        length: Option<i32>,
    ) -> Result<CreatedCable, CablingError> {
        let labels = self.writer.list_tagged_labels(&self.scope.trunk_tag).await?;
        let trunk_id = next_trunk_label(&labels)?;

        let req = NewCable {
            a_port_id: rear_a.id,
            b_port_id: rear_b.id,
            label: trunk_label(panel_a, panel_b, &trunk_id),
            status: status.to_string(),
            cable_type: cable_type::SMF_OS2.to_string(),
            length,
            tags: vec![self.scope.trunk_tag.clone()],
        };
        self.create(&req).await
    }

    /// Port locations are read before the write, so any error leaves no cable behind
    async fn create(&self, req: &NewCable) -> Result<CreatedCable, CablingError> {
        let a = self.writer.describe_port(req.a_port_id).await?;
        let z = self.writer.describe_port(req.b_port_id).await?;
        let cable = self.writer.create_cable(req).await?;
        tracing::info!(
            "Created cable {} ({}) {} {} <-> {} {}",
            cable.id,
            cable.label,
            a.device,
            a.port,
            z.device,
            z.port
        );
        let log = cable_log(&cable, &a, &z);
        Ok(CreatedCable { cable, log })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use anyhow::bail;

    use super::super::testing::{scope, PlantBuilder};
    use super::super::{PathResolver, PlantSnapshot};
    use super::*;
    use crate::models::Topology;

    /// Writer over a fixture plant that refuses ports already cabled
    struct FakeWriter {
        plant: PlantSnapshot,
        used: Mutex<HashSet<i64>>,
        cables: Mutex<Vec<Cable>>,
        existing_labels: Vec<String>,
        unknown_port: Option<i64>,
    }

    impl FakeWriter {
        fn new(plant: PlantSnapshot) -> Self {
            Self {
                plant,
                used: Mutex::new(HashSet::new()),
                cables: Mutex::new(Vec::new()),
                existing_labels: Vec::new(),
                unknown_port: None,
            }
        }
    }

    #[async_trait]
    impl CableWriter for FakeWriter {
        async fn create_cable(&self, req: &NewCable) -> Result<Cable> {
            let mut used = self.used.lock().unwrap();
            for id in [req.a_port_id, req.b_port_id] {
                let taken = self.plant.port(id).map(|p| !p.is_free()).unwrap_or(true);
                if taken || used.contains(&id) {
                    bail!("Port {} is already cabled", id);
                }
            }
            used.insert(req.a_port_id);
            used.insert(req.b_port_id);

            let mut cables = self.cables.lock().unwrap();
            let cable = Cable {
                id: cables.len() as i64 + 100,
                a_port_id: req.a_port_id,
                b_port_id: req.b_port_id,
                label: req.label.clone(),
                status: req.status.clone(),
                cable_type: req.cable_type.clone(),
                length: req.length,
                length_unit: "m".to_string(),
                tags: req.tags.clone(),
                created_at: chrono::Utc::now(),
            };
            cables.push(cable.clone());
            Ok(cable)
        }

        async fn list_tagged_labels(&self, _tag: &str) -> Result<Vec<String>> {
            Ok(self.existing_labels.clone())
        }

        async fn describe_port(&self, port_id: i64) -> Result<PortLocation> {
            if self.unknown_port == Some(port_id) {
                bail!("Port {} location lookup failed", port_id);
            }
            let port = self.plant.port(port_id).cloned().unwrap();
            Ok(PortLocation {
                site: "LAX1".to_string(),
                rack: format!("R{}", port.rack_id.unwrap_or_default()),
                device: port.device_name,
                port: port.name,
            })
        }
    }

    fn attrs() -> CableAttributes {
        CableAttributes {
            label: "CLR-1001".to_string(),
            status: "connected".to_string(),
            cable_type: "smf".to_string(),
            length: None,
        }
    }

    fn hub_plant() -> (PlantSnapshot, i64, i64, Vec<i64>) {
        let mut b = PlantBuilder::new();
        let x_dev = b.device("srv-1", 1);
        let x = b.interface(x_dev, "eth0");
        let y_dev = b.device("srv-2", 2);
        let y = b.interface(y_dev, "eth0");
        let (_, hub1) = b.panel_pair("SPK-1", 1, "HUB-1", 9, 1);
        let (_, hub2) = b.panel_pair("SPK-2", 2, "HUB-2", 9, 1);
        (b.build(), x, y, vec![hub1[0], hub2[0]])
    }

    #[tokio::test]
    async fn test_materialize_in_plan_order() {
        let (plant, x, y, _) = hub_plant();
        let plan = PathResolver::new(&plant)
            .resolve(plant.port(x).unwrap(), plant.port(y).unwrap())
            .unwrap();
        assert_eq!(plan.topology, Topology::Hub);

        let writer = FakeWriter::new(plant.clone());
        let scope = scope();
        let created = CableMaterializer::new(&writer, &scope)
            .materialize(&plan, &attrs())
            .await
            .unwrap();

        assert_eq!(created.len(), 3);
        for (made, segment) in created.iter().zip(&plan.segments) {
            assert_eq!(made.cable.a_port_id, segment.a.id);
            assert_eq!(made.cable.b_port_id, segment.b.id);
            assert_eq!(made.cable.label, "CLR-1001");
            assert!(made.log.starts_with("Created Cable\n"));
        }
        assert!(created[1].log.contains("**A Device**: `HUB-1`"));
        assert!(created[1].log.contains("**Z Device**: `HUB-2`"));
    }

    #[tokio::test]
    async fn test_materialize_reports_partial_creation() {
        let (plant, x, y, hubs) = hub_plant();
        let plan = PathResolver::new(&plant)
            .resolve(plant.port(x).unwrap(), plant.port(y).unwrap())
            .unwrap();

        let writer = FakeWriter::new(plant);
        // Someone else grabbed the hub port between planning and creation
        writer.used.lock().unwrap().insert(hubs[0]);

        let scope = scope();
        let err = CableMaterializer::new(&writer, &scope)
            .materialize(&plan, &attrs())
            .await
            .unwrap_err();

        match err {
            CablingError::PartialCreation {
                created,
                failed_segment,
                ..
            } => {
                assert_eq!(created, vec![100]);
                assert_eq!(failed_segment, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(writer.cables.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_location_lookup_writes_nothing_for_that_segment() {
        let (plant, x, y, hubs) = hub_plant();
        let plan = PathResolver::new(&plant)
            .resolve(plant.port(x).unwrap(), plant.port(y).unwrap())
            .unwrap();

        let mut writer = FakeWriter::new(plant);
        writer.unknown_port = Some(hubs[0]);

        let scope = scope();
        let err = CableMaterializer::new(&writer, &scope)
            .materialize(&plan, &attrs())
            .await
            .unwrap_err();

        let committed: Vec<i64> = writer.cables.lock().unwrap().iter().map(|c| c.id).collect();
        match err {
            CablingError::PartialCreation {
                created,
                failed_segment,
                ..
            } => {
                assert_eq!(created, committed);
                assert_eq!(failed_segment, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(committed, vec![100]);
    }

    #[tokio::test]
    async fn test_materialize_first_segment_failure_is_not_partial() {
        let (plant, x, y, _) = hub_plant();
        let plan = PathResolver::new(&plant)
            .resolve(plant.port(x).unwrap(), plant.port(y).unwrap())
            .unwrap();

        let writer = FakeWriter::new(plant);
        writer.used.lock().unwrap().insert(x);

        let scope = scope();
        let err = CableMaterializer::new(&writer, &scope)
            .materialize(&plan, &attrs())
            .await
            .unwrap_err();
        assert!(matches!(err, CablingError::Store(_)));
        assert!(writer.cables.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_trunk_labels_and_tags() {
        let mut b = PlantBuilder::new();
        let a = b.panel("SPK-1", 1);
        let z = b.panel("HUB-1", 9);
        let ra = b.rear(a, "RP1", 12);
        let rz = b.rear(z, "RP1", 12);
        let plant = b.build();

        let mut writer = FakeWriter::new(plant.clone());
        writer.existing_labels = vec![
            "COM--SPK-0--HUB-1--C0001".to_string(),
            "COM--SPK-9--HUB-1--C0003".to_string(),
        ];
        let scope = scope();
        let trunk = CableMaterializer::new(&writer, &scope)
            .create_trunk(
                "SPK-1",
                plant.port(ra).unwrap(),
                "HUB-1",
                plant.port(rz).unwrap(),
                "planned",
                Some(30),
            )
            .await
            .unwrap();

        assert_eq!(trunk.cable.label, "COM--SPK-1--HUB-1--C0004");
        assert_eq!(trunk.cable.cable_type, "smf-os2");
        assert_eq!(trunk.cable.tags, vec!["modular-trunk".to_string()]);
        assert_eq!(trunk.cable.length, Some(30));
        assert_eq!(trunk.cable.status, "planned");
    }
}
