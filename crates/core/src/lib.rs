pub mod alignment {
    pub mod domain {
        pub mod aligned_word;
        pub mod audio_segment;
        pub mod pronunciation_dictionary;
        pub mod speech_aligner;
        pub mod transcript_matcher;
        pub mod word_sorter;
    }
    pub mod infrastructure;
}

pub mod splicing {
    pub mod domain {
        pub mod audio_splicer;
        pub mod cancel_token;
        pub mod timestamp_strings;
    }
    pub mod infrastructure {
        pub mod script_splicer;
    }
}

pub mod pipeline {
    pub mod alphabetize_audio_use_case;
    pub mod alphabetize_error;
    pub mod prepare_audio_use_case;
    pub mod prepared_audio;
}

pub mod shared {
    pub mod constants;
    pub mod model_resolver;
    pub mod wav_path;
}
