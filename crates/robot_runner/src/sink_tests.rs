use super::*;

/// Accepts a fixed number of bytes, then reports a broken pipe.
struct BrokenPipe {
    budget: usize,
}

impl Write for BrokenPipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget < buf.len() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "cable unplugged"));
        }
        self.budget -= buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_writer_sink_one_symbol_per_line() {
    let mut sink = WriterSink::new(Vec::new(), "buffer");
    for d in [Direction::Up, Direction::Up, Direction::Right, Direction::Down] {
        sink.send(d).unwrap();
    }
    assert_eq!(sink.sent(), 4);
    assert_eq!(sink.name(), "buffer");
    assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "w\nw\nd\ns\n");
}

#[test]
fn test_writer_sink_surfaces_io_errors() {
    let mut sink = WriterSink::new(BrokenPipe { budget: 4 }, "pipe");
    sink.send(Direction::Left).unwrap();
    sink.send(Direction::Left).unwrap();
    let err = sink.send(Direction::Left).unwrap_err();
    assert!(matches!(err, SinkError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    assert_eq!(sink.sent(), 2);
}

#[test]
fn test_recording_sink_fails_on_request() {
    let mut sink = RecordingSink::failing_after(2);
    sink.send(Direction::Up).unwrap();
    sink.send(Direction::Down).unwrap();
    assert!(matches!(sink.send(Direction::Up), Err(SinkError::Rejected(_))));
    assert_eq!(sink.command_string(), "ws");
}
