//! Theater: where a viewing happened.

use serde::{Deserialize, Serialize};

/// A persisted theater row. Coordinates are kept as the operator typed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theater {
  pub id:        i64,
  pub name:      String,
  pub longitude: String,
  pub latitude:  String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTheater {
  pub name:      String,
  pub longitude: String,
  pub latitude:  String,
}

impl NewTheater {
  pub fn with_id(self, id: i64) -> Theater {
    Theater {
      id,
      name: self.name,
      longitude: self.longitude,
      latitude: self.latitude,
    }
  }
}
