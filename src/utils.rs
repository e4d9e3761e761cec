// Copyright 2025 Fernando Borretti
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

use std::time::Duration;

use studydeck_core::error::Fallible;
use studydeck_core::error::fail;
use tokio::net::TcpStream;
use tokio::time::Instant;
use tokio::time::sleep;

/// How long `serve` waits for its own listener before giving up on the browser.
pub const SERVER_START_TIMEOUT: Duration = Duration::from_secs(10);

/// Poll until something accepts connections on `host:port`, or fail once
/// `timeout` has passed.
pub async fn wait_for_server(host: &str, port: u16, timeout: Duration) -> Fallible<()> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(stream) = TcpStream::connect(format!("{host}:{port}")).await {
            drop(stream);
            return Ok(());
        }
        if Instant::now() >= deadline {
            return fail(format!(
                "nothing listening on {host}:{port} after {}ms",
                timeout.as_millis()
            ));
        }
        sleep(Duration::from_millis(5)).await;
    }
}
