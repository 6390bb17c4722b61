use image::{ImageBuffer, Rgba};
use lsb_embed::{
    cli::{CapacityArgs, HideArgs, MessageSource, RecoverArgs},
    handler::{handle_capacity, handle_hide, handle_recover},
    steganography::CapacityCheck,
};
use rand::RngCore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

fn hide_args(image: &Path, text: &Path, dest: Option<PathBuf>, force: bool) -> HideArgs {
    HideArgs {
        image: image.to_path_buf(),
        source: MessageSource {
            text: Some(text.to_path_buf()),
            message: None,
        },
        dest,
        force,
        capacity_check: CapacityCheck::Runes,
    }
}

/// 验证从隐藏到恢复的完整流程
#[test]
fn test_handle_hide_and_recover_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let hidden_image_path = dir.path().join("hidden.png");
    let source_text_path = dir.path().join("source.txt");
    let recovered_text_path = dir.path().join("recovered.txt");

    create_test_image(&original_image_path, 100, 100);
    let original_text = "This is a test message for the handler! 这是一个给处理器的测试信息！";
    fs::write(&source_text_path, original_text)?;

    // 2. 测试 handle_hide
    handle_hide(hide_args(
        &original_image_path,
        &source_text_path,
        Some(hidden_image_path.clone()),
        false,
    ))?;
    assert!(
        hidden_image_path.exists(),
        "Hidden image should be created."
    );

    // 3. 测试 handle_recover，长度需要由调用方提供
    let recover_args = RecoverArgs {
        image: hidden_image_path.clone(),
        length: original_text.len(),
        text: Some(recovered_text_path.clone()),
        force: false,
    };
    handle_recover(recover_args)?;
    assert!(
        recovered_text_path.exists(),
        "Recovered text file should be created."
    );

    // 4. 验证结果
    let recovered_text = fs::read_to_string(&recovered_text_path)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered text must match the original."
    );

    Ok(())
}

/// 验证直接通过 --message 提供文本，并且图像尺寸与 alpha 通道保持不变
#[test]
fn test_hide_inline_message_keeps_dimensions() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("cover.png");
    let dest_path = dir.path().join("stego.tiff");

    create_test_image(&image_path, 31, 17);
    let hide_args = HideArgs {
        image: image_path.clone(),
        source: MessageSource {
            text: None,
            message: Some("Hello world this is my experiment".to_string()),
        },
        dest: Some(dest_path.clone()),
        force: false,
        capacity_check: CapacityCheck::Bytes,
    };
    handle_hide(hide_args)?;

    let original = image::open(&image_path)?.to_rgba8();
    let hidden = image::open(&dest_path)?.to_rgba8();
    assert_eq!(original.dimensions(), hidden.dimensions());
    for (before, after) in original.pixels().zip(hidden.pixels()) {
        assert_eq!(before.0[3], after.0[3]);
    }

    Ok(())
}

/// 验证当用户不提供输出路径时，是否能正确生成默认路径并完成操作
#[test]
fn test_handle_hide_and_recover_with_defaults() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let source_text_path = dir.path().join("source.txt");

    create_test_image(&original_image_path, 100, 100);
    let original_text = "Testing default path generation. 测试默认路径生成。";
    fs::write(&source_text_path, original_text)?;

    // 2. 测试 handle_hide，不提供 dest 路径
    handle_hide(hide_args(&original_image_path, &source_text_path, None, false))?;

    // 验证默认的隐藏图像文件是否已创建
    let expected_hidden_path = dir.path().join("doctored_original.png");
    assert!(
        expected_hidden_path.exists(),
        "Default hidden image should be created at: {:?}",
        expected_hidden_path
    );

    // 3. 测试 handle_recover，不提供 text 输出路径
    let recover_args = RecoverArgs {
        image: expected_hidden_path,
        length: original_text.len(),
        text: None,
        force: false,
    };
    handle_recover(recover_args)?;

    // 验证默认的恢复文本文件是否已创建
    let expected_recovered_path = dir.path().join("recovered_doctored_original.txt");
    assert!(
        expected_recovered_path.exists(),
        "Default recovered text file should be created at: {:?}",
        expected_recovered_path
    );

    // 4. 验证结果
    let recovered_text = fs::read_to_string(&expected_recovered_path)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered text from default file must match the original."
    );

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let text_path = dir.path().join("text.txt");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 50, 50);
    fs::write(&text_path, "some text")?;

    // 2. 场景一：测试覆盖保护
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;
    assert!(dest_path.exists());

    let result = handle_hide(hide_args(&image_path, &text_path, Some(dest_path.clone()), false));
    assert!(result.is_err(), "Execution should fail without --force when file exists.");
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    // 3. 场景二：测试强制覆盖
    let result = handle_hide(hide_args(&image_path, &text_path, Some(dest_path.clone()), true));
    assert!(result.is_ok(), "Execution should succeed with --force when file exists.");

    let dummy_content = fs::read(&dest_path)?;
    assert_ne!(dummy_content, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证空间不足时的错误处理，并确认没有生成输出文件
#[test]
fn test_handle_hide_not_enough_space() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let text_path = dir.path().join("large.txt");
    let dest_path = dir.path().join("dest.png");

    // 创建一个非常小的图片
    create_test_image(&image_path, 10, 10);
    // 创建一个非常大的文本
    let large_text = "a".repeat(5000);
    fs::write(&text_path, large_text)?;

    // 2. 执行并断言错误
    let result = handle_hide(hide_args(&image_path, &text_path, Some(dest_path.clone()), false));

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Not enough space"));
    }
    assert!(!dest_path.exists());

    Ok(())
}

/// 验证有损格式的输出会被拒绝
#[test]
fn test_lossy_output_is_rejected() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("cover.png");
    let text_path = dir.path().join("text.txt");
    let dest_path = dir.path().join("out.jpg");

    create_test_image(&image_path, 20, 20);
    fs::write(&text_path, "secret")?;

    let result = handle_hide(hide_args(&image_path, &text_path, Some(dest_path.clone()), false));
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("lossy"));
    }
    assert!(!dest_path.exists());

    Ok(())
}

/// 验证请求恢复的长度超过图像容量时返回错误
#[test]
fn test_recover_length_beyond_capacity() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("tiny.png");
    create_test_image(&image_path, 4, 4);

    let recover_args = RecoverArgs {
        image: image_path,
        length: 7,
        text: Some(dir.path().join("out.txt")),
        force: false,
    };
    let result = handle_recover(recover_args);
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Failed to recover"));
    }

    Ok(())
}

/// 验证 capacity 命令可以正常运行，且缺失的图像会报错
#[test]
fn test_handle_capacity() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("cover.png");
    create_test_image(&image_path, 8, 8);

    handle_capacity(CapacityArgs {
        image: image_path,
    })?;

    let missing = handle_capacity(CapacityArgs {
        image: dir.path().join("missing.png"),
    });
    assert!(missing.is_err());

    Ok(())
}
