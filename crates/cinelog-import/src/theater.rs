//! Theater resolver: find by name or ask the operator for coordinates once.

use cinelog_core::{
  prompt::Prompter,
  store::CatalogStore,
  theater::{NewTheater, Theater},
};
use tracing::info;

use crate::{Error, Result, pipeline::Resolution};

/// Return the theater called `name`, creating it on first reference.
pub async fn resolve_theater<S, P>(
  store: &S,
  prompter: &mut P,
  name: &str,
) -> Result<Resolution<Theater>>
where
  S: CatalogStore,
  P: Prompter,
{
  if let Some(theater) = store.find_theater_by_name(name).await.map_err(Error::store)? {
    info!("Found {name} in database");
    return Ok(Resolution::Found(theater));
  }

  info!("Did not find {name} in database");
  let (latitude, longitude) = collect_coordinates(prompter)?;

  let theater = store
    .create_theater(NewTheater {
      name: name.to_owned(),
      longitude,
      latitude,
    })
    .await
    .map_err(Error::store)?;
  Ok(Resolution::Created(theater))
}

/// Ask for `(latitude, longitude)`.
///
/// Accepts a pasted `"lat, long"` pair at the first prompt; otherwise asks
/// for the longitude separately. Both values are trimmed.
pub fn collect_coordinates<P: Prompter>(prompter: &mut P) -> Result<(String, String)> {
  prompter.say("Find theater in Google Maps...");
  let entry = prompter.ask("Latitude: ")?;

  let (latitude, longitude) = match entry.split_once(',') {
    Some((lat, long)) if !long.trim().is_empty() => (lat.to_owned(), long.to_owned()),
    Some((lat, _)) => (lat.to_owned(), prompter.ask("Longitude: ")?),
    None => (entry.clone(), prompter.ask("Longitude: ")?),
  };

  Ok((latitude.trim().to_owned(), longitude.trim().to_owned()))
}
