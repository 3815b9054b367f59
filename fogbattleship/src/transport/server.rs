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
use std::{
    net::{Ipv4Addr, SocketAddr, TcpListener},
    ops::RangeInclusive,
};

use log::{debug, info};

use crate::transport::{Connection, LineStream, TransportError};

/// Listens on the first free port of a range and accepts exactly one peer.
#[derive(Debug)]
pub struct Server {
    ports: RangeInclusive<u16>,
    listener: Option<TcpListener>,
    stream: LineStream,
}

impl Server {
    /// Create a server that will try ports `min_port..=max_port` in order. A port of 0
    /// lets the operating system choose.
    pub fn new(min_port: u16, max_port: u16) -> Self {
        Self {
            ports: min_port..=max_port,
            listener: None,
            stream: LineStream::default(),
        }
    }

    /// Bind the first port in the range that is free and return the bound address.
    /// If already listening, returns the current address.
    pub fn listen(&mut self) -> Result<SocketAddr, TransportError> {
        if let Some(listener) = &self.listener {
            return Ok(listener.local_addr()?);
        }
        for port in self.ports.clone() {
            match TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)) {
                Ok(listener) => {
                    let addr = listener.local_addr()?;
                    info!("server running on {}, waiting for a connection", addr);
                    self.listener = Some(listener);
                    return Ok(addr);
                }
                Err(err) => debug!("could not bind port {}: {}", port, err),
            }
        }
        Err(TransportError::NoAvailablePort {
            min: *self.ports.start(),
            max: *self.ports.end(),
        })
    }

    /// Wait for a single peer to connect, then stop listening.
    pub fn accept(&mut self) -> Result<SocketAddr, TransportError> {
        let listener = self.listener.as_ref().ok_or(TransportError::NotConnected)?;
        let (stream, peer) = listener.accept()?;
        self.listener = None;
        info!("client connected: {}", peer);
        self.stream.attach(stream)?;
        Ok(peer)
    }

    /// Returns true while a peer connection is open.
    pub fn is_connected(&self) -> bool {
        self.stream.is_open()
    }
}

impl Connection for Server {
    fn connect(&mut self) -> Result<(), TransportError> {
        self.listen()?;
        self.accept().map(|_| ())
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
