#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegistryMetrics {
    pub total_routes_registered: usize,
    pub total_routes_removed: usize,
    pub total_filters_registered: usize,
    pub total_namespaces_mounted: usize,
}

impl RegistryMetrics {
    pub fn record_insert(&mut self, count: usize) {
        self.total_routes_registered += count;
    }

    pub fn record_removal(&mut self, count: usize) {
        self.total_routes_removed += count;
    }

    pub fn record_filter(&mut self) {
        self.total_filters_registered += 1;
    }

    pub fn record_namespace(&mut self) {
        self.total_namespaces_mounted += 1;
    }
}
