use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// 逐行讀取來源檔，第一行一律視為標頭並丟棄。
///
/// Single pass: the reader is owned by the iterator, so the file handle is
/// closed as soon as the `LineSource` is dropped, whether iteration finished
/// or stopped on an error.
pub struct LineSource<R> {
    reader: R,
    header_pending: bool,
    buf: Vec<u8>,
}

impl LineSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            header_pending: true,
            buf: Vec::new(),
        }
    }

    /// `\n`, `\r\n` and a lone `\r` all end a line.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        let mut read_any = false;

        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                if !read_any {
                    return Ok(None);
                }
                break;
            }
            read_any = true;

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(pos) => {
                    let terminator = available[pos];
                    self.buf.extend_from_slice(&available[..pos]);
                    self.reader.consume(pos + 1);
                    if terminator == b'\r' && self.reader.fill_buf()?.first() == Some(&b'\n') {
                        self.reader.consume(1);
                    }
                    break;
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }

        // 非 UTF-8 的位元組以替代字元解碼，不中止執行
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.read_line() {
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
                Ok(Some(_)) if self.header_pending => {
                    self.header_pending = false;
                    tracing::debug!("Skipped header line");
                }
                Ok(Some(line)) => return Some(Ok(line)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn collect(input: &[u8]) -> Vec<String> {
        LineSource::from_reader(Cursor::new(input.to_vec()))
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_header_is_always_discarded() {
        assert_eq!(collect(b"a;b;c;d;e\n1;x;10;Alpha;500\n"), vec!["1;x;10;Alpha;500"]);
        // 標頭內容不影響：即使看起來像資料列也丟棄
        assert_eq!(collect(b"1;x;10;Alpha;500\n2;y;20;Beta;600"), vec!["2;y;20;Beta;600"]);
    }

    #[test]
    fn test_empty_and_header_only_inputs_yield_nothing() {
        assert!(collect(b"").is_empty());
        assert!(collect(b"header").is_empty());
        assert!(collect(b"header\n").is_empty());
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        assert_eq!(
            collect(b"h\r\n1;x;10;A;5\r\n\r\n2;y;20;B;6"),
            vec!["1;x;10;A;5", "", "2;y;20;B;6"]
        );
    }

    #[test]
    fn test_cr_only_line_endings() {
        assert_eq!(
            collect(b"h;h;h;h;h\r1;x;10;Alpha;500\r2;y;20;Beta;900\r"),
            vec!["1;x;10;Alpha;500", "2;y;20;Beta;900"]
        );
        // 混合行尾
        assert_eq!(collect(b"h\r\na\rb\nc\r\r\nd"), vec!["a", "b", "c", "", "d"]);
    }

    #[test]
    fn test_crlf_split_across_buffer_refills() {
        let reader = BufReader::with_capacity(2, Cursor::new(b"h\r\na\r\nb".to_vec()));
        let lines = LineSource::from_reader(reader)
            .collect::<io::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let lines = collect(b"h\n1;x;10;Le\xf3n;5\n");
        assert_eq!(lines, vec!["1;x;10;Le\u{fffd}n;5"]);
    }

    struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "disk went away")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_mid_stream_failure_is_reported() {
        let reader = BufReader::new(FailingReader {
            data: Cursor::new(b"h\n1;x;10;A;5\n".to_vec()),
        });
        let mut source = LineSource::from_reader(reader);

        assert_eq!(source.next().unwrap().unwrap(), "1;x;10;A;5");
        assert!(source.next().unwrap().is_err());
    }
}
