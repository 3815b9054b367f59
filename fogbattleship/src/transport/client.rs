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
use std::net::TcpStream;

use log::info;

use crate::transport::{Connection, LineStream, TransportError};

/// Connects to a peer listening on a fixed host and port.
#[derive(Debug)]
pub struct Client {
    host: String,
    port: u16,
    stream: LineStream,
}

impl Client {
    /// Create a client for the given host and port. Nothing is opened until
    /// [`connect`][Connection::connect].
    pub fn new<H: Into<String>>(host: H, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            stream: LineStream::default(),
        }
    }

    /// Host this client connects to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port this client connects to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns true while the connection is open.
    pub fn is_connected(&self) -> bool {
        self.stream.is_open()
    }
}

impl Connection for Client {
    fn connect(&mut self) -> Result<(), TransportError> {
        let stream = TcpStream::connect((self.host.as_str(), self.port))?;
        info!("connected to {}:{}", self.host, self.port);
        self.stream.attach(stream)
    }

    fn send_message(&mut self, message: &str) -> Result<(), TransportError> {
        self.stream.send(message)
    }

    fn receive_message(&mut self) -> Result<String, TransportError> {
        self.stream.receive()
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.stream.close()
    }
}
