mod subscription;
