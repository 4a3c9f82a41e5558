pub mod compile_time {
    pub mod artifacts {
        /// Entry count above which a reduced artifact is also written.
        pub const REDUCED_ARTIFACT_THRESHOLD: usize = 10_000;

        /// Number of entries kept in the reduced artifact.
        pub const REDUCED_ARTIFACT_SIZE: usize = 10_000;
    }

    pub mod batch {
        /// A progress line is logged whenever the current sequence id is
        /// a multiple of this interval.
        pub const PROGRESS_LOG_INTERVAL: u32 = 10;
    }

    pub mod logging {
        /// Maximum log events retained per entry in the collector.
        pub const MAX_EVENTS_PER_SEQUENCE: usize = 100;
    }

    pub mod entry {
        /// Number of digits in a canonical A-number after the `A`.
        pub const A_NUMBER_WIDTH: usize = 6;

        /// Length of the directive marker plus its trailing space (`%S `).
        pub const PAYLOAD_PREFIX_LEN: usize = 3;
    }
}
