//! Video slides through ffmpeg: raw RGBA frames decoded over a pipe into a
//! texture, and an ffplay sidecar for sound while unmuted.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use anyhow::{Result, anyhow, bail};
use raylib::prelude::*;

use crate::constants::{FPS, VIDEO_HEIGHT, VIDEO_WIDTH};
use crate::texture;

fn frame_len() -> usize {
    (VIDEO_WIDTH * VIDEO_HEIGHT * 4) as usize
}

// Cover-crops whatever the file's aspect ratio is to the decode size.
fn scale_filter() -> String {
    format!(
        "scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h}",
        w = VIDEO_WIDTH,
        h = VIDEO_HEIGHT
    )
}

/// A looping, muted video decode. One frame is pulled per call to
/// [`VideoPlayer::advance`]; when nobody pulls, the pipe fills up and the
/// decoder simply stalls, so hidden videos cost nothing.
pub struct VideoPlayer {
    process: Child,
    stdout: ChildStdout,
    texture: Texture2D,
    frame: Vec<u8>,
    path: PathBuf,
    finished: bool,
}

impl VideoPlayer {
    pub fn spawn(rl: &mut RaylibHandle, thread: &RaylibThread, path: &Path) -> Result<VideoPlayer> {
        if !path.exists() {
            bail!("video file {} does not exist", path.display());
        }
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .args(["-loglevel", "error"])
            .args(["-stream_loop", "-1"])
            .arg("-i")
            .arg(path)
            .args(["-f", "rawvideo"])
            .args(["-pix_fmt", "rgba"])
            .args(["-vf", &scale_filter()])
            .args(["-r", &FPS.to_string()])
            .arg("-an")
            .arg("pipe:1")
            .spawn()
            .map_err(|e| anyhow!("starting ffmpeg for {}: {}", path.display(), e))?;

        let stdout = match process.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let _ = process.kill();
                let _ = process.wait();
                bail!("ffmpeg stdout was not piped");
            }
        };
        let texture = match texture::blank_texture(rl, thread, VIDEO_WIDTH, VIDEO_HEIGHT) {
            Ok(texture) => texture,
            Err(e) => {
                let _ = process.kill();
                let _ = process.wait();
                return Err(e);
            }
        };

        log::debug!("decoding {} at {}x{}", path.display(), VIDEO_WIDTH, VIDEO_HEIGHT);
        Ok(VideoPlayer {
            process,
            stdout,
            texture,
            frame: vec![0u8; frame_len()],
            path: path.to_path_buf(),
            finished: false,
        })
    }

    /// Pull the next decoded frame into the texture. Blocks on the pipe at
    /// most one frame's worth, which is what paces playback to the render
    /// loop.
    pub fn advance(&mut self) {
        if self.finished {
            return;
        }
        match self.stdout.read_exact(&mut self.frame) {
            Ok(()) => {
                let _ = self.texture.update_texture(&self.frame);
            }
            Err(e) => {
                log::warn!("video decode ended for {}: {}", self.path.display(), e);
                self.finished = true;
            }
        }
    }

    pub fn texture(&self) -> &Texture2D {
        &self.texture
    }
}

impl Drop for VideoPlayer {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

/// Sound for the active video while unmuted. Spawned on unmute, dropped on
/// mute or slide change; the audio clock restarts rather than chasing the
/// frame pipe.
pub struct AudioSidecar {
    process: Child,
}

impl AudioSidecar {
    pub fn spawn(path: &Path) -> Result<AudioSidecar> {
        if !path.exists() {
            bail!("video file {} does not exist", path.display());
        }
        let process = Command::new("ffplay")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .args(["-loglevel", "error"])
            .args(["-nodisp", "-vn"])
            .args(["-loop", "0"])
            .arg(path)
            .spawn()
            .map_err(|e| anyhow!("starting ffplay for {}: {}", path.display(), e))?;
        log::debug!("audio sidecar started for {}", path.display());
        Ok(AudioSidecar { process })
    }
}

impl Drop for AudioSidecar {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_buffer_matches_the_decode_size() {
        assert_eq!(frame_len(), 1280 * 720 * 4);
    }

    #[test]
    fn filter_crops_to_the_decode_size() {
        let filter = scale_filter();
        assert!(filter.starts_with("scale=1280:720"));
        assert!(filter.ends_with("crop=1280:720"));
        assert!(filter.contains("force_original_aspect_ratio=increase"));
    }

    #[test]
    fn spawning_a_missing_file_fails_up_front() {
        let err = AudioSidecar::spawn(Path::new("/no/such/file.mp4")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
