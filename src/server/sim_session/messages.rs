use actix::prelude::*;
use serde::{Serialize, Deserialize};
use serde_json::Value;
use uuid::Uuid;

use super::session::ViewerSession;
use crate::sim::render::PaletteEntry;
use crate::sim::{Dice, Engine};

#[derive(Message)]
#[rtype(result = "()")]
pub struct ProcessClientMessage {
    pub msg: ClientAction,
    pub viewer_id: Uuid,
    pub addr: Addr<ViewerSession>,
}

/// Commands a viewer may send.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "action", content = "data")]
pub enum ClientAction {
    /// Click with the named tool at a cell.
    Paint { row: i32, col: i32, tool: String },
    SetSpeed { ticks_per_frame: u32 },
    Clear,
    Ping,
}

/// Sent back to a viewer after the simulation accepted one of its commands.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ActionAccepted;

/// Grid contents at the end of a frame, as material codes in row-major order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub generation: u64,
    pub rows: i32,
    pub cols: i32,
    pub cells: Vec<u8>,
}

impl FrameSnapshot {
    pub fn capture<D: Dice>(engine: &Engine<D>) -> Self {
        let (rows, cols) = engine.dimensions();
        FrameSnapshot {
            generation: engine.generation(),
            rows,
            cols,
            cells: engine.grid().cells().iter().map(|m| m.code()).collect(),
        }
    }
}

// Server -> client
#[derive(Message, Serialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    Welcome {
        sim_id: Uuid,
        viewer_id: Uuid,
        rows: i32,
        cols: i32,
        ticks_per_frame: u32,
        palette: Vec<PaletteEntry>,
    },
    Frame(FrameSnapshot),
    Error {
        code: String,
        message: String,
        context: Option<Value>,
    },
}

impl ServerWsMessage {
    pub fn frame(snapshot: FrameSnapshot) -> Self {
        Self::Frame(snapshot)
    }
    pub fn error(code: &str, message: &str, context: Option<Value>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.to_string(),
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Material;

    #[test]
    fn test_parse_client_actions() {
        let paint: ClientAction =
            serde_json::from_str(r#"{"action":"Paint","data":{"row":3,"col":4,"tool":"Sand"}}"#).unwrap();
        assert_eq!(paint, ClientAction::Paint { row: 3, col: 4, tool: "Sand".to_string() });

        let speed: ClientAction =
            serde_json::from_str(r#"{"action":"SetSpeed","data":{"ticks_per_frame":50}}"#).unwrap();
        assert_eq!(speed, ClientAction::SetSpeed { ticks_per_frame: 50 });

        let clear: ClientAction = serde_json::from_str(r#"{"action":"Clear"}"#).unwrap();
        assert_eq!(clear, ClientAction::Clear);
    }

    #[test]
    fn test_reject_malformed_action() {
        assert!(serde_json::from_str::<ClientAction>(r#"{"action":"Explode"}"#).is_err());
        assert!(serde_json::from_str::<ClientAction>(r#"{"action":"SetSpeed","data":{"ticks_per_frame":-1}}"#).is_err());
    }

    #[test]
    fn test_frame_snapshot_codes() {
        let mut engine = Engine::seeded(2, 2, 1).unwrap();
        engine.paint(0, 1, Material::Water).unwrap();
        engine.paint(1, 0, Material::Magma).unwrap();

        let snapshot = FrameSnapshot::capture(&engine);
        assert_eq!(snapshot.rows, 2);
        assert_eq!(snapshot.cols, 2);
        assert_eq!(snapshot.cells, vec![0, 3, 6, 0]);

        let text = serde_json::to_string(&ServerWsMessage::frame(snapshot)).unwrap();
        assert!(text.starts_with(r#"{"action":"Frame","data":{"generation":0"#));
    }
}
