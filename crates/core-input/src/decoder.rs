//! Blocking, poll-based terminal input decoder (spec §4.6).
//!
//! Bytes arrive via a `libc::poll`-gated blocking read with a one-byte
//! pushback for look-ahead. UTF-8 is decoded with Bjoern Hoehrmann's
//! branchless DFA; `REJECT` resets the decoder without emitting anything.
//! Escape handling is explicit: `ESC` alone (timeout with no follow-up
//! byte) is an unhandled `Esc`; `ESC [` begins a CSI sequence whose final
//! byte in `{A,B,C,D,H,F,Z,~,M}` produces a navigation or mouse event.

use std::io;
use std::os::unix::io::RawFd;

use crate::keytoken::{Direction, InputEvent, MouseEvent, NavEvent};

/// Default read timeout outside the insert-mode redraw loop.
pub const DEFAULT_TIMEOUT_MS: i32 = 200;
/// Tighter timeout used while insert-mode redraw is in progress, so the
/// cursor keeps blinking/redrawing responsively between keystrokes.
pub const INSERT_TIMEOUT_MS: i32 = 10;

const UTF8_ACCEPT: u32 = 0;
const UTF8_REJECT: u32 = 1;

#[rustfmt::skip]
const UTF8D: [u8; 364] = [
    // byte -> character class
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1, 1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
    9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,9, 7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,
    7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7, 7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,
    8,8,2,2,2,2,2,2,2,2,2,2,2,2,2,2, 2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,
    10,3,3,3,3,3,3,3,3,3,3,3,3,4,3,3, 11,6,6,6,5,8,8,8,8,8,8,8,8,8,8,8,
    // (state, class) -> state
    0,12,24,36,60,96,84,12,12,12,48,72, 12,12,12,12,12,12,12,12,12,12,12,12,
    12,0,12,12,12,12,12,0,12,0,12,12, 12,24,12,12,12,12,12,24,12,24,12,12,
    12,12,12,12,12,12,12,24,12,12,12,12, 12,24,12,12,12,12,12,12,12,24,12,12,
    12,12,12,12,12,12,12,36,12,36,12,12, 12,36,12,12,12,12,12,36,12,36,12,12,
    12,36,12,12,12,12,12,12,12,12,12,12,
];

fn utf8_decode(state: &mut u32, codepoint: &mut u32, byte: u8) -> u32 {
    let class = UTF8D[byte as usize] as u32;
    *codepoint = if *state != UTF8_ACCEPT {
        (byte as u32 & 0x3f) | (*codepoint << 6)
    } else {
        (0xffu32 >> class) & byte as u32
    };
    *state = UTF8D[(256 + *state as usize + class as usize)] as u32;
    *state
}

pub struct InputDecoder {
    fd: RawFd,
    pushback: Option<u8>,
}

impl InputDecoder {
    pub fn new(fd: RawFd) -> Self {
        Self { fd, pushback: None }
    }

    fn push_back(&mut self, byte: u8) {
        debug_assert!(self.pushback.is_none(), "only one byte of pushback is supported");
        self.pushback = Some(byte);
    }

    fn poll_readable(&self, timeout_ms: i32) -> io::Result<bool> {
        let mut pfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let rc = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(rc > 0 && pfd.revents & libc::POLLIN != 0)
    }

    fn read_byte(&mut self, timeout_ms: i32) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pushback.take() {
            return Ok(Some(byte));
        }
        if !self.poll_readable(timeout_ms)? {
            return Ok(None);
        }
        let mut byte: u8 = 0;
        let n = unsafe { libc::read(self.fd, &mut byte as *mut u8 as *mut libc::c_void, 1) };
        if n <= 0 {
            return Ok(None);
        }
        Ok(Some(byte))
    }

    /// Read and decode the next event, using the loop's normal or tight
    /// timeout depending on whether insert-mode redraw is in progress.
    pub fn next_event(&mut self, insert_mode: bool) -> io::Result<Option<InputEvent>> {
        let timeout = if insert_mode { INSERT_TIMEOUT_MS } else { DEFAULT_TIMEOUT_MS };
        self.next_event_with_timeout(timeout)
    }

    pub fn next_event_with_timeout(&mut self, timeout_ms: i32) -> io::Result<Option<InputEvent>> {
        let Some(first) = self.read_byte(timeout_ms)? else {
            return Ok(None);
        };
        if first == 0x1b {
            return self.decode_escape(timeout_ms);
        }
        self.decode_utf8(first, timeout_ms)
    }

    fn decode_escape(&mut self, timeout_ms: i32) -> io::Result<Option<InputEvent>> {
        let Some(second) = self.read_byte(timeout_ms)? else {
            return Ok(Some(InputEvent::Esc));
        };
        if second != b'[' {
            self.push_back(second);
            return Ok(Some(InputEvent::Esc));
        }
        self.decode_csi(timeout_ms)
    }

    fn decode_csi(&mut self, timeout_ms: i32) -> io::Result<Option<InputEvent>> {
        let mut params = Vec::new();
        loop {
            let Some(byte) = self.read_byte(timeout_ms)? else {
                return Ok(Some(InputEvent::Esc));
            };
            match byte {
                b'0'..=b'9' | b';' => params.push(byte),
                b'M' => return self.decode_mouse(timeout_ms),
                b'A' | b'B' | b'C' | b'D' | b'H' | b'F' | b'Z' | b'~' => {
                    return Ok(Some(csi_to_nav(&params, byte)));
                }
                _ => return Ok(Some(InputEvent::Esc)),
            }
        }
    }

    fn decode_mouse(&mut self, timeout_ms: i32) -> io::Result<Option<InputEvent>> {
        let Some(buttons) = self.read_byte(timeout_ms)? else {
            return Ok(None);
        };
        let Some(x) = self.read_byte(timeout_ms)? else {
            return Ok(None);
        };
        let Some(y) = self.read_byte(timeout_ms)? else {
            return Ok(None);
        };
        Ok(MouseEvent::decode(buttons, x, y).map(InputEvent::Mouse))
    }

    fn decode_utf8(&mut self, first: u8, timeout_ms: i32) -> io::Result<Option<InputEvent>> {
        let mut state = UTF8_ACCEPT;
        let mut codepoint = 0u32;
        utf8_decode(&mut state, &mut codepoint, first);
        while state != UTF8_ACCEPT && state != UTF8_REJECT {
            let Some(byte) = self.read_byte(timeout_ms)? else {
                // Ran out of bytes mid-sequence; drop it rather than block
                // forever (spec §4.6: "on REJECT the decoder resets
                // without emitting").
                return Ok(None);
            };
            utf8_decode(&mut state, &mut codepoint, byte);
        }
        if state == UTF8_REJECT {
            return Ok(None);
        }
        Ok(char::from_u32(codepoint).map(InputEvent::Char))
    }
}

fn csi_to_nav(params: &[u8], final_byte: u8) -> InputEvent {
    let groups: Vec<&[u8]> = params.split(|&b| b == b';').collect();
    let parse = |g: &[u8]| std::str::from_utf8(g).ok().and_then(|s| s.parse::<u8>().ok());
    let first_param = groups.first().copied().and_then(parse);
    let modifier = groups.get(1).copied().and_then(parse);

    let direction = match final_byte {
        b'A' => Some(Direction::Up),
        b'B' => Some(Direction::Down),
        b'C' => Some(Direction::Right),
        b'D' => Some(Direction::Left),
        _ => None,
    };
    if let Some(dir) = direction {
        let nav = match modifier {
            Some(5) => NavEvent::WordMove(dir),
            Some(3) => NavEvent::SplitResize(dir),
            Some(4) => NavEvent::CrossSplitFocus(dir),
            _ => NavEvent::Move(dir),
        };
        return InputEvent::Nav(nav);
    }
    let nav = match final_byte {
        b'H' => NavEvent::Home,
        b'F' => NavEvent::End,
        b'Z' => NavEvent::ShiftTab,
        b'~' => match first_param {
            Some(5) => NavEvent::PageUp,
            Some(6) => NavEvent::PageDown,
            _ => NavEvent::Home,
        },
        _ => NavEvent::Home,
    };
    InputEvent::Nav(nav)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keytoken::{MouseButton, MouseEventKind};
    use std::io::Write;
    use std::os::fd::FromRawFd;

    fn pipe() -> (RawFd, std::fs::File) {
        let mut fds = [0i32; 2];
        let rc = unsafe { libc::pipe(fds.as_mut_ptr()) };
        assert_eq!(rc, 0);
        let writer = unsafe { std::fs::File::from_raw_fd(fds[1]) };
        (fds[0], writer)
    }

    #[test]
    fn decodes_plain_ascii() {
        let (read_fd, mut writer) = pipe();
        writer.write_all(b"x").unwrap();
        let mut decoder = InputDecoder::new(read_fd);
        let event = decoder.next_event_with_timeout(50).unwrap();
        assert_eq!(event, Some(InputEvent::Char('x')));
    }

    #[test]
    fn decodes_two_byte_utf8() {
        let (read_fd, mut writer) = pipe();
        writer.write_all("é".as_bytes()).unwrap();
        let mut decoder = InputDecoder::new(read_fd);
        let event = decoder.next_event_with_timeout(50).unwrap();
        assert_eq!(event, Some(InputEvent::Char('é')));
    }

    #[test]
    fn lone_esc_times_out_to_bare_esc() {
        let (read_fd, mut writer) = pipe();
        writer.write_all(&[0x1b]).unwrap();
        let mut decoder = InputDecoder::new(read_fd);
        let event = decoder.next_event_with_timeout(20).unwrap();
        assert_eq!(event, Some(InputEvent::Esc));
    }

    #[test]
    fn csi_arrow_up_decodes_to_move_nav() {
        let (read_fd, mut writer) = pipe();
        writer.write_all(b"\x1b[A").unwrap();
        let mut decoder = InputDecoder::new(read_fd);
        let event = decoder.next_event_with_timeout(50).unwrap();
        assert_eq!(event, Some(InputEvent::Nav(NavEvent::Move(Direction::Up))));
    }

    #[test]
    fn csi_with_modifier_5_is_word_move() {
        let (read_fd, mut writer) = pipe();
        writer.write_all(b"\x1b[1;5C").unwrap();
        let mut decoder = InputDecoder::new(read_fd);
        let event = decoder.next_event_with_timeout(50).unwrap();
        assert_eq!(
            event,
            Some(InputEvent::Nav(NavEvent::WordMove(Direction::Right)))
        );
    }

    #[test]
    fn csi_page_up_down() {
        let (read_fd, mut writer) = pipe();
        writer.write_all(b"\x1b[5~").unwrap();
        let mut decoder = InputDecoder::new(read_fd);
        let event = decoder.next_event_with_timeout(50).unwrap();
        assert_eq!(event, Some(InputEvent::Nav(NavEvent::PageUp)));
    }

    #[test]
    fn csi_mouse_packet_decodes_left_click() {
        let (read_fd, mut writer) = pipe();
        // ESC [ M <buttons=32><x=33><y=34>
        writer.write_all(&[0x1b, b'[', b'M', 32, 33, 34]).unwrap();
        let mut decoder = InputDecoder::new(read_fd);
        let event = decoder.next_event_with_timeout(50).unwrap();
        match event {
            Some(InputEvent::Mouse(m)) => {
                assert_eq!(m.kind, MouseEventKind::Click(MouseButton::Left));
                assert_eq!(m.column, 1);
                assert_eq!(m.row, 2);
            }
            other => panic!("expected mouse event, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_continuation_yields_nothing() {
        let (read_fd, mut writer) = pipe();
        // 0xC3 starts a 2-byte sequence; 0x00 is not a valid continuation.
        writer.write_all(&[0xC3, 0x00]).unwrap();
        let mut decoder = InputDecoder::new(read_fd);
        let event = decoder.next_event_with_timeout(50).unwrap();
        assert_eq!(event, None);
    }
}
