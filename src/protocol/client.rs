use crate::VERSION;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::net::TcpStream;

/// Both halves of a dealer connection after the version handshake.
pub struct Connection {
    pub reader: BufReader<TcpStream>,
    pub writer: BufWriter<TcpStream>,
}

/// Connects to the dealer's seat port and announces the protocol version.
pub fn connect(host: &str, port: u16) -> anyhow::Result<Connection> {
    use anyhow::Context;
    let stream = TcpStream::connect((host, port))
        .with_context(|| format!("could not connect to dealer at {}:{}", host, port))?;
    stream
        .set_nodelay(true)
        .context("could not disable Nagle on dealer socket")?;
    log::info!("{:<32}{:<32}", "connected to dealer", format!("{}:{}", host, port));
    let mut writer = BufWriter::new(stream.try_clone().context("could not split dealer socket")?);
    handshake(&mut writer).context("could not send version")?;
    Ok(Connection {
        reader: BufReader::new(stream),
        writer,
    })
}

/// Sends the version line, flushed on its own.
pub fn handshake<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writer.write_all(VERSION.as_bytes())?;
    writer.flush()?;
    log::info!("{:<32}{:<32}", "sent version", VERSION.trim_end());
    Ok(())
}
