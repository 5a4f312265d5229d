//! MessagePack implementation of the agent repository.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::AgentRepository, q_learning::SavedAgent};

/// MessagePack-based agent repository.
///
/// # Examples
///
/// ```no_run
/// use qttt::adapters::MsgPackRepository;
/// use qttt::app::AgentConfig;
/// use qttt::ports::AgentRepository;
/// use qttt::q_learning::{QAgent, SavedAgent};
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let agent = QAgent::new(AgentConfig::default())?;
///
/// repo.save(&SavedAgent::from_agent(&agent), Path::new("agent.msgpack"))?;
/// let loaded = repo.load(Path::new("agent.msgpack"))?.to_agent()?;
/// # Ok::<(), qttt::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl AgentRepository for MsgPackRepository {
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, agent).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize agent to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: "deserialize agent from MessagePack".to_string(),
                message: e.to_string(),
            }
        })
    }
}
