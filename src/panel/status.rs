use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::{
    sync::watch::{Receiver, Sender, channel},
    task::JoinHandle,
    time::Instant,
};
use uuid::Uuid;

///how long a board may sit with nobody listening before it is forgotten
const UNWATCHED_GRACE: Duration = Duration::from_secs(60);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    serial: u64,
}

/// The transient status line of one open panel. Showing a message replaces whatever is up and
/// restarts the one dismissal timer, so an older timer can never hide a newer
/// message.
#[derive(Clone, Debug)]
pub struct StatusBoard {
    sender: Sender<Option<StatusMessage>>,
    timer: Arc<Mutex<Option<JoinHandle<()>>>>,
    serial: Arc<AtomicU64>,
    lifetime: Duration,
}

impl StatusBoard {
    pub fn new(lifetime: Duration) -> Self {
        let (sender, _rx) = channel(None);
        Self {
            sender,
            timer: Arc::new(Mutex::new(None)),
            serial: Arc::new(AtomicU64::new(0)),
            lifetime,
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(text, StatusKind::Success);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(text, StatusKind::Error);
    }

    pub fn show(&self, text: impl Into<String>, kind: StatusKind) {
        let serial = self.serial.fetch_add(1, Ordering::Relaxed) + 1;
        let message = StatusMessage {
            text: text.into(),
            kind,
            serial,
        };
        debug!(kind = ?message.kind, text = %message.text, "Showing status");

        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.take() {
            previous.abort();
        }
        self.sender.send_replace(Some(message));

        let sender = self.sender.clone();
        let lifetime = self.lifetime;
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            //only clear the message this timer was started for
            sender.send_if_modified(|current| {
                if current.as_ref().is_some_and(|m| m.serial == serial) {
                    *current = None;
                    true
                } else {
                    false
                }
            });
        }));
    }

    pub fn hide(&self) {
        self.cancel_timer();
        self.sender.send_if_modified(|current| current.take().is_some());
    }

    pub fn current(&self) -> Option<StatusMessage> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> Receiver<Option<StatusMessage>> {
        self.sender.subscribe()
    }

    fn is_idle(&self) -> bool {
        self.sender.receiver_count() == 0 && self.sender.borrow().is_none()
    }

    pub fn cancel_timer(&self) {
        if let Some(timer) = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            timer.abort();
        }
    }
}

/// One `StatusBoard` per open panel, so messages never cross between browsers.
#[derive(Clone, Debug)]
pub struct StatusBoards {
    boards: Arc<Mutex<HashMap<Uuid, (Instant, StatusBoard)>>>,
    lifetime: Duration,
}

impl StatusBoards {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            boards: Arc::new(Mutex::new(HashMap::new())),
            lifetime,
        }
    }

    ///a fresh panel id and its (empty) board, forgetting boards nobody is using
    pub fn open(&self) -> (Uuid, StatusBoard) {
        let id = Uuid::new_v4();
        let board = StatusBoard::new(self.lifetime);

        let mut boards = self.boards.lock().unwrap_or_else(PoisonError::into_inner);
        boards.retain(|_, (opened, board)| {
            opened.elapsed() < UNWATCHED_GRACE || !board.is_idle()
        });
        boards.insert(id, (Instant::now(), board.clone()));
        debug!(%id, open = boards.len(), "Opened panel");

        (id, board)
    }

    ///the board for `id`, starting a new one if it was forgotten (eg. across a restart)
    pub fn board(&self, id: Uuid) -> StatusBoard {
        self.boards
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id)
            .or_insert_with(|| (Instant::now(), StatusBoard::new(self.lifetime)))
            .1
            .clone()
    }

    pub fn cancel_timers(&self) {
        for (_, board) in self
            .boards
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
        {
            board.cancel_timer();
        }
    }
}
