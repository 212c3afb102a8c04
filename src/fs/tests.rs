use tokio::io::AsyncWriteExt;

use crate::ArcPath;

use super::Fs;

#[tokio::test]
async fn test_fs_write_then_read() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = ArcPath::from(temp_dir.path().join("config.toml"));
    let fs = Fs::spawn();

    fs.write_file(path.clone(), "window_size = 5\n".to_string())
        .await
        .unwrap();
    assert_eq!(fs.read_file(path.clone()).await.unwrap(), "window_size = 5\n");

    // Writing again truncates
    fs.write_file(path.clone(), "a".to_string()).await.unwrap();
    assert_eq!(fs.read_file(path).await.unwrap(), "a");
}

#[tokio::test]
async fn test_fs_open_file_appends() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = ArcPath::from(temp_dir.path().join("latest.log"));
    let fs = Fs::spawn();

    let mut file = fs.open_file(path.clone()).await.unwrap();
    file.write_all(b"first\n").await.unwrap();
    file.flush().await.unwrap();
    drop(file);

    let mut file = fs.open_file(path.clone()).await.unwrap();
    file.write_all(b"second\n").await.unwrap();
    file.flush().await.unwrap();

    assert_eq!(fs.read_file(path).await.unwrap(), "first\nsecond\n");
}

#[tokio::test]
async fn test_fs_mkdir_read_dir_remove() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = ArcPath::from(temp_dir.path().join("nested").join("logs"));
    let file = ArcPath::from(dir.join("a.log"));
    let fs = Fs::spawn();

    fs.mkdir(dir.clone()).await.unwrap();
    assert!(fs.read_dir(dir.clone()).await.unwrap().is_empty());

    fs.open_file(file.clone()).await.unwrap();
    assert_eq!(fs.read_dir(dir.clone()).await.unwrap().len(), 1);

    fs.remove_file(file).await.unwrap();
    assert!(fs.read_dir(dir).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fs_read_missing_file() {
    let fs = Fs::spawn();
    let result = fs
        .read_file(ArcPath::from("/definitely/not/here/cinedeck.toml"))
        .await;
    assert!(matches!(result, Err(e) if e.kind() == std::io::ErrorKind::NotFound));
}

#[tokio::test]
async fn test_fs_mock_reroots_absolute_paths() {
    let fs = Fs::mock();
    let dir = ArcPath::from("/tmp/cinedeck/logs");
    let file = ArcPath::from("/tmp/cinedeck/logs/latest.log");

    assert!(fs.read_file(file.clone()).await.is_err());
    fs.mkdir(dir.clone()).await.unwrap();
    fs.write_file(file.clone(), "hello".to_string()).await.unwrap();
    assert_eq!(fs.read_file(file.clone()).await.unwrap(), "hello");
    assert_eq!(fs.read_dir(dir).await.unwrap().len(), 1);
    fs.remove_file(file).await.unwrap();
}
