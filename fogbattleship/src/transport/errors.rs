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
use std::io;

use thiserror::Error;

/// Error returned by a [`Connection`][crate::transport::Connection].
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection was never opened or has been closed.
    #[error("socket is not connected or is closed")]
    NotConnected,

    /// The peer closed its side of the connection.
    #[error("end of stream reached, peer may have disconnected")]
    EndOfStream,

    /// None of the ports in the server's range could be bound.
    #[error("failed to start server on any port in {min}..={max}")]
    NoAvailablePort {
        /// First port tried.
        min: u16,
        /// Last port tried.
        max: u16,
    },

    /// Underlying socket failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}
