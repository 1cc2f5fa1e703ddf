/// Output of a separation run.
use super::method::Method;

/// Parameters actually used, whether supplied or resolved from the data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolvedParams {
    pub k: Option<f64>,
    pub interval_width: Option<usize>,
    pub boughton_c: Option<f64>,
    pub ihacres_c: Option<f64>,
    pub bfi_max: Option<f64>,
    pub c3c1: Option<f64>,
    pub ewma_e: Option<f64>,
    pub willems_w: Option<f64>,
}

/// One baseflow column with its scores.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodOutput {
    pub method: Method,
    pub baseflow: Vec<f64>,
    /// KGE of baseflow against discharge over strict-baseflow days.
    /// `1 - sqrt(3)` when the record has no strict-baseflow day.
    pub kge: f64,
    /// Baseflow index `sum(b) / sum(Q)`.
    pub bfi: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeparationResult {
    /// Strict-baseflow mask of the discharge series.
    pub strict: Vec<bool>,
    pub params: ResolvedParams,
    pub outputs: Vec<MethodOutput>,
}

impl SeparationResult {
    /// Number of days in every column.
    pub fn len(&self) -> usize {
        self.strict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strict.is_empty()
    }

    pub fn methods(&self) -> impl Iterator<Item = Method> + '_ {
        self.outputs.iter().map(|o| o.method)
    }

    pub fn get(&self, method: Method) -> Option<&MethodOutput> {
        self.outputs.iter().find(|o| o.method == method)
    }

    pub fn baseflow(&self, method: Method) -> Option<&[f64]> {
        self.get(method).map(|o| o.baseflow.as_slice())
    }

    pub fn kge(&self, method: Method) -> Option<f64> {
        self.get(method).map(|o| o.kge)
    }

    pub fn bfi(&self, method: Method) -> Option<f64> {
        self.get(method).map(|o| o.bfi)
    }
}
