use std::sync::mpsc::Sender;

/// Something that can make a sound when the sound timer runs out.
///
/// The machine calls `trigger` from inside `step`, so implementations
/// should hand the work off rather than play the sound themselves.
pub trait SoundSink {
    fn trigger(&mut self);
}

/// A sound sink that never makes a sound.
#[derive(Debug, Default)]
pub struct Mute;

impl SoundSink for Mute {
    fn trigger(&mut self) {}
}

impl<F: FnMut()> SoundSink for F {
    fn trigger(&mut self) {
        self()
    }
}

/// Sends a message over a channel for every trigger, leaving
/// the actual playback to whoever holds the receiver.
pub struct ChannelSound {
    sender: Sender<()>,
}

impl ChannelSound {
    pub fn new(sender: Sender<()>) -> ChannelSound {
        ChannelSound { sender }
    }
}

impl SoundSink for ChannelSound {
    fn trigger(&mut self) {
        // Nobody listening is not the machine's problem
        if self.sender.send(()).is_err() {
            log::debug!("Sound receiver is gone, dropping trigger");
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn channel_sound_sends_one_message_per_trigger() {
        let (sender, receiver) = channel();
        let mut sound = ChannelSound::new(sender);
        sound.trigger();
        sound.trigger();
        assert_eq!(receiver.try_iter().count(), 2);
    }

    #[test]
    fn channel_sound_survives_a_dropped_receiver() {
        let (sender, receiver) = channel();
        drop(receiver);
        let mut sound = ChannelSound::new(sender);
        sound.trigger();
    }

    #[test]
    fn closures_are_sound_sinks() {
        let mut count = 0;
        {
            let mut sink = || count += 1;
            sink.trigger();
            sink.trigger();
        }
        assert_eq!(count, 2);
    }
}
