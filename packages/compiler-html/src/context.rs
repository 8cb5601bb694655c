use crate::CompileOptions;

/// Output buffer with indentation tracking
pub(crate) struct Context<'a> {
    options: &'a CompileOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    pub(crate) fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    pub(crate) fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub(crate) fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    /// Insert pre-rendered markup verbatim (each fragment is rendered on its
    /// own so it is byte-identical wherever it is embedded)
    pub(crate) fn add_raw(&mut self, markup: &str) {
        self.add(markup);
    }

    /// Line that opens an element; following lines are nested one level
    pub(crate) fn open(&mut self, text: &str) {
        self.add_line(text);
        self.indent();
    }

    /// Line that closes the element opened by the matching [`Context::open`]
    pub(crate) fn close(&mut self, text: &str) {
        self.dedent();
        self.add_line(text);
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub(crate) fn options(&self) -> &CompileOptions {
        self.options
    }

    pub(crate) fn get_output(self) -> String {
        self.buffer
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
