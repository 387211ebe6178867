use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A concrete prediction category served by the inference service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Endpoint {
    Disease,
    Variety,
    Age,
}

/// What the user asked for. `All` is a selector, not an endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    #[default]
    Disease,
    Variety,
    Age,
    All,
}

const ALL_ENDPOINTS: [Endpoint; 3] = [Endpoint::Disease, Endpoint::Variety, Endpoint::Age];

impl Endpoint {
    /// Request path on the inference service.
    pub fn path(&self) -> String {
        format!("/predict/{}", self)
    }

    /// Title-cased label for result cards.
    pub fn title(&self) -> &'static str {
        match self {
            Endpoint::Disease => "Disease",
            Endpoint::Variety => "Variety",
            Endpoint::Age => "Age",
        }
    }
}

impl Category {
    /// Endpoints to call for this selection, in result-group order.
    pub fn expand(&self) -> &'static [Endpoint] {
        match self {
            Category::Disease => &ALL_ENDPOINTS[0..1],
            Category::Variety => &ALL_ENDPOINTS[1..2],
            Category::Age => &ALL_ENDPOINTS[2..3],
            Category::All => &ALL_ENDPOINTS,
        }
    }
}

impl From<Endpoint> for Category {
    fn from(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Disease => Category::Disease,
            Endpoint::Variety => Category::Variety,
            Endpoint::Age => Category::Age,
        }
    }
}
