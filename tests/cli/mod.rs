mod branch;
mod commit;
mod init;
mod merge;
mod status;
