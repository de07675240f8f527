//! WebSocket-based live reload.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Messages sent to connected browsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HmrMessage {
    /// Full page reload
    Reload,

    /// The edited files could not be loaded; the previous site stays live
    Error {
        /// Human-readable load error
        message: String,
    },

    /// Connection established
    Connected,
}

/// Hub for broadcasting reload messages to all connected clients.
#[derive(Debug, Clone)]
pub struct HmrHub {
    sender: broadcast::Sender<HmrMessage>,
}

impl HmrHub {
    /// Create a new hub.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send a message to all connected clients.
    pub fn send(&self, msg: HmrMessage) {
        // Ignore send errors (no receivers)
        let _ = self.sender.send(msg);
    }

    /// Subscribe to reload messages.
    pub fn subscribe(&self) -> broadcast::Receiver<HmrMessage> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for HmrHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate the client-side reload script for the WebSocket at `path`.
pub fn hmr_client_script(path: &str) -> String {
    format!(
        r#"
(function() {{
  'use strict';

  const scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  const ws = new WebSocket(scheme + location.host + '{}');
  let reconnectAttempts = 0;
  const maxReconnectAttempts = 10;

  function showError(message) {{
    let banner = document.getElementById('__hmr-error');
    if (!banner) {{
      banner = document.createElement('pre');
      banner.id = '__hmr-error';
      banner.style.cssText = 'position:fixed;left:0;right:0;bottom:0;margin:0;padding:1rem;z-index:9999;background:#7f1d1d;color:#fff;white-space:pre-wrap;';
      document.body.appendChild(banner);
    }}
    banner.textContent = message;
  }}

  ws.onopen = function() {{
    console.log('[HMR] Connected');
    reconnectAttempts = 0;
  }};

  ws.onmessage = function(event) {{
    const msg = JSON.parse(event.data);
    console.log('[HMR]', msg.type);

    switch (msg.type) {{
      case 'reload':
        location.reload();
        break;

      case 'error':
        showError(msg.message);
        break;

      case 'connected':
        console.log('[HMR] Server acknowledged connection');
        break;
    }}
  }};

  ws.onclose = function() {{
    console.log('[HMR] Disconnected');
    if (reconnectAttempts < maxReconnectAttempts) {{
      reconnectAttempts++;
      setTimeout(function() {{
        console.log('[HMR] Reconnecting...');
        location.reload();
      }}, 1000 * reconnectAttempts);
    }}
  }};

  ws.onerror = function(e) {{
    console.error('[HMR] WebSocket error:', e);
  }};
}})();
"#,
        path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hub_broadcasts_messages() {
        let hub = HmrHub::new();
        let mut rx = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 1);

        hub.send(HmrMessage::Reload);

        match rx.try_recv() {
            Ok(HmrMessage::Reload) => {}
            _ => panic!("Expected Reload message"),
        }
    }

    #[test]
    fn serializes_messages() {
        let msg = HmrMessage::Error {
            message: "Price table has no entry for base.wreath.small".to_string(),
        };

        let json = serde_json::to_string(&msg).unwrap();

        assert!(json.contains(r#""type":"error""#));
        assert!(json.contains("base.wreath.small"));
        assert_eq!(serde_json::from_str::<HmrMessage>(&json).unwrap(), msg);
    }

    #[test]
    fn client_script_targets_path() {
        let script = hmr_client_script("/__hmr");
        assert!(script.contains("location.host + '/__hmr'"));
        assert!(script.contains("case 'error'"));
    }
}
