use super::InfosetKey;
use super::StrategyEntry;
use crate::Probability;
use crate::gameplay::Action;
use crate::gameplay::ActionError;
use std::collections::HashMap;

/// The precomputed strategy table, loaded once and only read afterwards.
///
/// # Persisted format
///
/// A JSON object keyed by infoset key. Each value is a pair of parallel
/// lists: action codes (0 fold, 1 call, n >= 2 raise to n) and their
/// probabilities.
///
/// ```json
/// { "AQp": [[0, 200], [0.06, 0.94]] }
/// ```
#[derive(Debug, Default, Clone)]
pub struct StrategyStore(HashMap<InfosetKey, StrategyEntry>);

/// Wire shape of one table value.
#[derive(serde::Deserialize)]
struct Record(Vec<i64>, Vec<Probability>);

impl StrategyStore {
    pub fn load(path: &std::path::Path) -> Result<Self, LoadError> {
        log::info!("{:<32}{:<32}", "loading strategy", path.display());
        let file = std::fs::File::open(path).map_err(|source| LoadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let store = Self::from_reader(std::io::BufReader::new(file))?;
        log::info!("{:<32}{:<32}", "loaded strategy entries", store.len());
        Ok(store)
    }

    pub fn from_reader<R>(reader: R) -> Result<Self, LoadError>
    where
        R: std::io::Read,
    {
        let table = serde_json::from_reader::<_, HashMap<String, Record>>(reader)?;
        let store = table
            .into_iter()
            .map(|(key, Record(codes, probabilities))| {
                codes
                    .into_iter()
                    .map(Action::try_from)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(LoadError::from)
                    .and_then(|actions| StrategyEntry::try_from((actions, probabilities)))
                    .map(|entry| (InfosetKey::from(key.as_str()), entry))
                    .map_err(|source| LoadError::Invalid {
                        key,
                        source: Box::new(source),
                    })
            })
            .collect::<Result<HashMap<_, _>, _>>()
            .map(Self)?;
        let skewed = store
            .0
            .iter()
            .filter(|(_, entry)| !entry.is_normalized())
            .inspect(|(key, entry)| {
                log::warn!("probabilities at {} sum to {:.9}", key, entry.mass())
            })
            .count();
        if skewed > 0 {
            log::warn!("{} strategy entries are not normalized", skewed);
        }
        Ok(store)
    }

    pub fn lookup(&self, key: &InfosetKey) -> Option<&StrategyEntry> {
        self.0.get(key.as_str())
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(InfosetKey, StrategyEntry)> for StrategyStore {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (InfosetKey, StrategyEntry)>,
    {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read strategy {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed strategy table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid strategy entry {key:?}: {source}")]
    Invalid {
        key: String,
        #[source]
        source: Box<LoadError>,
    },
    #[error("{actions} actions but {probabilities} probabilities")]
    Length { actions: usize, probabilities: usize },
    #[error("no actions")]
    Empty,
    #[error("invalid probability {0}")]
    Probability(Probability),
    #[error(transparent)]
    Action(#[from] ActionError),
}
