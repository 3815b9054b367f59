// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Blocking, newline-delimited text channel between two peers.
//!
//! Messages are opaque UTF-8 strings. Each is written followed by `\n`, so a message must
//! not itself contain a newline. No message schema or turn protocol is defined here.
use std::{
    io::{self, BufRead, BufReader, Write},
    net::{Shutdown, TcpStream},
};

use log::debug;

pub use self::{client::Client, errors::TransportError, server::Server};

mod client;
mod errors;
mod server;

/// A connection to a single remote peer.
pub trait Connection {
    /// Establish the connection to the remote peer.
    fn connect(&mut self) -> Result<(), TransportError>;

    /// Send one message to the peer.
    fn send_message(&mut self, message: &str) -> Result<(), TransportError>;

    /// Wait for the next message from the peer. Surrounding whitespace is trimmed.
    fn receive_message(&mut self) -> Result<String, TransportError>;

    /// Close the connection. Fails if it is not open.
    fn close(&mut self) -> Result<(), TransportError>;
}

/// An open TCP stream, split into a buffered reader and a writer.
#[derive(Debug)]
struct OpenStream {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

/// Line-oriented stream shared by [`Client`] and [`Server`]. Starts closed.
#[derive(Debug, Default)]
pub(crate) struct LineStream {
    open: Option<OpenStream>,
}

impl LineStream {
    /// Take ownership of a connected TCP stream.
    pub(crate) fn attach(&mut self, stream: TcpStream) -> Result<(), TransportError> {
        let reader = BufReader::new(stream.try_clone()?);
        self.open = Some(OpenStream {
            reader,
            writer: stream,
        });
        Ok(())
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open.is_some()
    }

    fn get(&mut self) -> Result<&mut OpenStream, TransportError> {
        self.open.as_mut().ok_or(TransportError::NotConnected)
    }

    pub(crate) fn send(&mut self, message: &str) -> Result<(), TransportError> {
        let writer = &mut self.get()?.writer;
        writer.write_all(message.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    pub(crate) fn receive(&mut self) -> Result<String, TransportError> {
        let reader = &mut self.get()?.reader;
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(TransportError::EndOfStream);
        }
        Ok(line.trim().to_owned())
    }

    pub(crate) fn close(&mut self) -> Result<(), TransportError> {
        let open = self.open.take().ok_or(TransportError::NotConnected)?;
        match open.writer.shutdown(Shutdown::Both) {
            // The peer may already have torn the connection down.
            Err(err) if err.kind() != io::ErrorKind::NotConnected => Err(err.into()),
            _ => {
                debug!("connection closed");
                Ok(())
            }
        }
    }
}
